use anyhow::{Context, Result};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories never descended into when expanding a directory argument.
const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules", "tmp", "log"];

pub struct FileHandler {
    backup_enabled: bool,
}

impl FileHandler {
    pub fn new(backup_enabled: bool) -> Self {
        Self { backup_enabled }
    }

    pub fn find_ruby_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                // Explicitly named files are checked whatever their extension
                files.push(path.clone());
            } else if path.is_dir() {
                self.find_ruby_files_in_dir(path, &mut files)?;
            } else {
                // Treat as glob pattern
                let pattern = path.to_str().context("Invalid path")?;
                for entry in glob(pattern).context("Failed to read glob pattern")? {
                    let file = entry.context("Failed to process glob entry")?;
                    if self.is_ruby_file(&file) {
                        files.push(file);
                    }
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn find_ruby_files_in_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_dir() {
                if let Some(name) = path.file_name() {
                    let name = name.to_string_lossy();
                    if !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|skipped| *skipped == name) {
                        self.find_ruby_files_in_dir(&path, files)?;
                    }
                }
            } else if self.is_ruby_file(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    fn is_ruby_file(&self, path: &Path) -> bool {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "rb" | "rake" | "gemspec" | "ru"));
        let by_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matches!(name, "Gemfile" | "Rakefile" | "Guardfile"));

        by_extension || by_name
    }

    pub fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if self.backup_enabled {
            self.create_backup(path)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    fn create_backup(&self, path: &Path) -> Result<()> {
        let mut backup_name = path.as_os_str().to_owned();
        backup_name.push(".bak");
        let backup_path = PathBuf::from(backup_name);

        fs::copy(path, &backup_path)
            .with_context(|| format!("Failed to create backup: {}", backup_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_ruby_file() {
        let handler = FileHandler::new(false);

        assert!(handler.is_ruby_file(Path::new("user.rb")));
        assert!(handler.is_ruby_file(Path::new("lib/tasks/db.rake")));
        assert!(handler.is_ruby_file(Path::new("shop.gemspec")));
        assert!(handler.is_ruby_file(Path::new("config.ru")));
        assert!(handler.is_ruby_file(Path::new("Gemfile")));
        assert!(handler.is_ruby_file(Path::new("Rakefile")));

        assert!(!handler.is_ruby_file(Path::new("user.erb")));
        assert!(!handler.is_ruby_file(Path::new("user.py")));
        assert!(!handler.is_ruby_file(Path::new("README")));
    }

    #[test]
    fn test_find_ruby_files_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let rb_file = temp_dir.path().join("user.rb");
        fs::write(&rb_file, "# user").unwrap();

        let handler = FileHandler::new(false);
        let files = handler.find_ruby_files(&[rb_file.clone()]).unwrap();

        assert_eq!(files, vec![rb_file]);
    }

    #[test]
    fn test_find_ruby_files_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        let models = temp_dir.path().join("app").join("models");
        fs::create_dir_all(&models).unwrap();

        let user = models.join("user.rb");
        let rake = temp_dir.path().join("seed.rake");
        let view = models.join("user.html.erb");
        fs::write(&user, "# user").unwrap();
        fs::write(&rake, "# seed").unwrap();
        fs::write(&view, "<%= 1 %>").unwrap();

        let handler = FileHandler::new(false);
        let files = handler
            .find_ruby_files(&[temp_dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&user));
        assert!(files.contains(&rake));
        assert!(!files.contains(&view));
    }

    #[test]
    fn test_skip_vendor_and_hidden_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let vendor = temp_dir.path().join("vendor").join("bundle");
        let hidden = temp_dir.path().join(".git");
        fs::create_dir_all(&vendor).unwrap();
        fs::create_dir_all(&hidden).unwrap();

        let app = temp_dir.path().join("app.rb");
        fs::write(&app, "# app").unwrap();
        fs::write(vendor.join("gem.rb"), "# gem").unwrap();
        fs::write(hidden.join("hook.rb"), "# hook").unwrap();

        let handler = FileHandler::new(false);
        let files = handler
            .find_ruby_files(&[temp_dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(files, vec![app]);
    }

    #[test]
    fn test_create_backup() {
        let temp_dir = TempDir::new().unwrap();
        let rb_file = temp_dir.path().join("user.rb");
        let original_content = "class User\nend\n";
        fs::write(&rb_file, original_content).unwrap();

        let handler = FileHandler::new(true);
        handler.write_file(&rb_file, "class Account\nend\n").unwrap();

        let backup_file = temp_dir.path().join("user.rb.bak");
        assert!(backup_file.exists());
        assert_eq!(fs::read_to_string(&backup_file).unwrap(), original_content);
        assert_eq!(fs::read_to_string(&rb_file).unwrap(), "class Account\nend\n");
    }

    #[test]
    fn test_no_backup_when_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let rb_file = temp_dir.path().join("Gemfile");
        fs::write(&rb_file, "source 'https://rubygems.org'\n").unwrap();

        FileHandler::new(false)
            .write_file(&rb_file, "source \"https://rubygems.org\"\n")
            .unwrap();

        assert!(!temp_dir.path().join("Gemfile.bak").exists());
    }
}
