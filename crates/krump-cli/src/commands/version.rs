//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum measurement results as krump report cards",
        style("Krump").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  krump-hal           Job, result and backend types");
    println!("  krump-decoder       Bitstring-to-move tables");
    println!("  krump-render        SVG report renderer");
    println!("  krump-adapter-mock  Bell-state mock backend");
    println!("  krump-cli           Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
