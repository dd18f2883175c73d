use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rbarrange::engine::Linter;
use std::path::Path;

const SMALL_MODEL: &str = r#"
class User < ApplicationRecord
  validates :email, presence: true
  has_many :posts
  scope :inactive, -> { where(active: false) }
  scope :active, -> { where(active: true) }

  def display_name
    name.presence || email
  end
end
"#;

fn medium_source() -> String {
    let mut source = String::from("module Billing\n");
    for idx in 0..40 {
        source.push_str(&format!(
            r#"  class Invoice{idx} < ApplicationRecord
    def total
      @subtotal = line_items.sum(&:amount)
      @tax = @subtotal * 0.2
      @subtotal + @tax
    end

    # Lines on the invoice.
    has_many :line_items
    include Auditable
    include Archivable
    validates :number, presence: true
    MAX_LINES = 50

    private

    def recalculate
      update(total: total)
    end
  end

"#
        ));
    }
    source.push_str("end\n");
    source
}

fn bench_lint_small(c: &mut Criterion) {
    let linter = Linter::default();
    let path = Path::new("app/models/user.rb");

    c.bench_function("lint_small_model", |b| {
        b.iter(|| linter.lint(black_box(SMALL_MODEL), path).unwrap())
    });
}

fn bench_lint_medium(c: &mut Criterion) {
    let linter = Linter::default();
    let path = Path::new("app/models/billing.rb");
    let source = medium_source();

    c.bench_function("lint_medium_file", |b| {
        b.iter(|| linter.lint(black_box(&source), path).unwrap())
    });
}

fn bench_fix_medium(c: &mut Criterion) {
    let linter = Linter::default();
    let path = Path::new("app/models/billing.rb");
    let source = medium_source();

    c.bench_function("fix_medium_file", |b| {
        b.iter(|| linter.fix(black_box(&source), path).unwrap())
    });
}

criterion_group!(benches, bench_lint_small, bench_lint_medium, bench_fix_medium);
criterion_main!(benches);
