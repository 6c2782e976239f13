//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - SAT formulas to reversible oracle circuits",
        style("orq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  orq-ir      Reversible circuit intermediate representation");
    println!("  orq-sat     CNF formulas, DIMACS and graph reductions");
    println!("  orq-oracle  Oracle synthesis strategies");
    println!("  orq-sim     Basis-state simulator and oracle checks");
    println!("  orq-cli     Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
