use insta::assert_snapshot;
use rbarrange::lint_ruby;

fn report(source: &str, filename: &str) -> String {
    lint_ruby(source, filename)
        .unwrap()
        .iter()
        .map(|offense| format!("{filename}:{offense}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[test]
fn test_report_model_order() {
    let input = "class User < ApplicationRecord\n  validates :name, presence: true\n  has_many :posts\nend\n";

    assert_snapshot!(
        report(input, "app/models/user.rb"),
        @"app/models/user.rb:3:3: Layout/ModelElementOrder: Model elements should be ordered: concerns → constants → associations → validations → callbacks → scopes → class methods → instance methods → protected → private. [Correctable]"
    );
}

#[test]
fn test_report_class_order() {
    let input = "module Tools\n  def run\n  end\n\n  def self.build\n  end\nend\n";

    assert_snapshot!(
        report(input, "lib/tools.rb"),
        @"lib/tools.rb:5:3: Layout/ClassElementOrder: Class elements should be ordered: concerns → constants → class methods → initialize → instance methods → protected → private. [Correctable]"
    );
}

#[test]
fn test_report_includes() {
    let input = "class Widget\n  include Zeta\n  include Alpha\nend\n";

    assert_snapshot!(
        report(input, "lib/widget.rb"),
        @"lib/widget.rb:3:3: Layout/OrderedIncludes: Sort consecutive `include` statements alphabetically. [Correctable]"
    );
}

#[test]
fn test_report_alignment() {
    let input = "h[\"a\"] = 1\nh[\"bb\"] = 2\n";

    assert_snapshot!(
        report(input, "lib/hash.rb"),
        @"lib/hash.rb:1:1: Layout/IndexedAssignmentAlignment: Align the `=` operators of consecutive indexed assignments. [Correctable]"
    );
}

#[test]
fn test_report_uncorrectable() {
    let input = "class Report\n  def run\n  end\n  QUERY = <<~SQL\n    SELECT 1\n  SQL\nend\n";

    assert_snapshot!(
        report(input, "lib/report.rb"),
        @"lib/report.rb:4:3: Layout/ClassElementOrder: Class elements should be ordered: concerns → constants → class methods → initialize → instance methods → protected → private."
    );
}

#[test]
fn test_report_let_braces() {
    let input = "describe Cart do\n  let(:cart) { Cart.new }\n  let(:line_item) { LineItem.new }\nend\n";

    assert_snapshot!(
        report(input, "spec/cart_spec.rb"),
        @"spec/cart_spec.rb:2:3: RSpec/LetBraceAlignment: Align the `{` braces of consecutive `let` definitions. [Correctable]"
    );
}

#[test]
fn test_report_clean() {
    assert_snapshot!(report("x = 1\n", "lib/x.rb"), @"");
}
