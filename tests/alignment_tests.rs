// Tests for operator alignment across consecutive statements

use pretty_assertions::assert_eq;
use rbarrange::{fix_ruby, lint_ruby};

fn offense_lines(source: &str, cop: &str) -> Vec<usize> {
    lint_ruby(source, "test.rb")
        .unwrap()
        .into_iter()
        .filter(|offense| offense.cop == cop)
        .map(|offense| offense.location.line)
        .collect()
}

#[test]
fn test_indexed_assignments_are_aligned() {
    let input = "h[\"a\"] = 1\nh[\"bb\"] = 2\n";

    assert_eq!(offense_lines(input, "Layout/IndexedAssignmentAlignment"), vec![1]);
    assert_eq!(fix_ruby(input, "test.rb").unwrap(), "h[\"a\"]  = 1\nh[\"bb\"] = 2\n");
}

#[test]
fn test_adjacent_lines_form_one_group() {
    let input = r#"
name = "Ada"
email_address = "ada@example.com"
age = 36
"#;

    let expected = r#"
name          = "Ada"
email_address = "ada@example.com"
age           = 36
"#;
    assert_eq!(offense_lines(input, "Layout/AssignmentAlignment"), vec![2, 4]);
    assert_eq!(fix_ruby(input, "test.rb").unwrap(), expected);
}

#[test]
fn test_blank_line_separates_groups() {
    let input = r#"
a = 1
bb = 2

ccc = 3
d = 4
"#;

    let expected = r#"
a  = 1
bb = 2

ccc = 3
d   = 4
"#;
    assert_eq!(fix_ruby(input, "test.rb").unwrap(), expected);
}

#[test]
fn test_other_statement_breaks_group() {
    let input = r#"
a = 1
puts a
bbb = 2
"#;

    assert!(offense_lines(input, "Layout/AssignmentAlignment").is_empty());
}

#[test]
fn test_multi_line_statement_joins_following_line() {
    let input = r#"
config = {
  retries: 3,
}
timeout = 5
"#;

    let expected = r#"
config  = {
  retries: 3,
}
timeout = 5
"#;
    assert_eq!(fix_ruby(input, "test.rb").unwrap(), expected);
}

#[test]
fn test_constants_in_class_body() {
    let input = r#"
class Limits
  MIN =     1
  MAXIMUM = 10
  X = 3
end
"#;

    assert_eq!(offense_lines(input, "Layout/ConstantAlignment"), vec![3, 5]);
}

#[test]
fn test_operator_without_spacing_sets_target() {
    let input = r#"
@first_name=first_name
@id = id
"#;

    let output = fix_ruby(input, "test.rb").unwrap();
    assert_eq!(output, "\n@first_name=first_name\n@id        = id\n");
    assert!(lint_ruby(&output, "test.rb").unwrap().is_empty());
}

#[test]
fn test_let_braces_are_aligned() {
    let input = r#"
RSpec.describe User do
  let(:user) { create(:user) }
  let!(:admin_user) { create(:user, :admin) }
  let(:id) { user.id }

  it "works" do
    expect(user).to be_valid
  end
end
"#;

    let expected = r#"
RSpec.describe User do
  let(:user)        { create(:user) }
  let!(:admin_user) { create(:user, :admin) }
  let(:id)          { user.id }

  it "works" do
    expect(user).to be_valid
  end
end
"#;
    assert_eq!(offense_lines(input, "RSpec/LetBraceAlignment"), vec![3, 5]);
    assert_eq!(fix_ruby(input, "spec/user_spec.rb").unwrap(), expected);
}

#[test]
fn test_instance_variables_in_constructor() {
    let input = r#"
class Account
  def initialize(owner, balance)
    @owner = owner
    @balance = balance
  end
end
"#;

    let expected = r#"
class Account
  def initialize(owner, balance)
    @owner   = owner
    @balance = balance
  end
end
"#;
    assert_eq!(fix_ruby(input, "lib/account.rb").unwrap(), expected);
}

#[test]
fn test_same_line_assignments_settle() {
    let input = "a = 1; bb = 2\n";

    assert!(offense_lines(input, "Layout/AssignmentAlignment").is_empty());
    assert_eq!(fix_ruby(input, "test.rb").unwrap(), input);
}

#[test]
fn test_same_line_lets_settle() {
    let input = "describe X do\n  let(:a) { 1 }; let(:bbb) { 2 }\nend\n";

    assert!(offense_lines(input, "RSpec/LetBraceAlignment").is_empty());
    assert_eq!(fix_ruby(input, "spec/x_spec.rb").unwrap(), input);
}

#[test]
fn test_shared_line_aligns_with_next_line() {
    let input = "a = 1; b = 2\nccc = 3\n";

    assert_eq!(offense_lines(input, "Layout/AssignmentAlignment"), vec![2]);
    let output = fix_ruby(input, "test.rb").unwrap();
    assert_eq!(output, "a = 1; b = 2\nccc      = 3\n");
    assert!(lint_ruby(&output, "test.rb").unwrap().is_empty());
}
