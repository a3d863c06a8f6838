use eu_vat_rates::*;

fn main() {
    // Fail at start-up if the embedded snapshot were corrupt
    load();

    println!("=== EU VAT rates (version {}) ===\n", data_version());
    println!("  Source: {} <{}>\n", dataset().source, dataset().url);

    for (code, r) in get_all_rates() {
        let reduced = r
            .reduced
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {code}  {:<15} {}  standard={:>5}  reduced=[{reduced}]  super={}  parking={}",
            r.country,
            r.currency,
            r.standard,
            r.super_reduced.map_or("-".into(), |v| v.to_string()),
            r.parking.map_or("-".into(), |v| v.to_string()),
        );
    }

    // Lookups with codes that arrive at runtime
    println!("\n=== Runtime lookups ===\n");

    for input in ["DE", "GR", "EL", "US", "fr"] {
        match as_member(input) {
            Some(code) => println!(
                "  {input} => {} ({}%)",
                code.rate().country,
                code.standard_rate()
            ),
            None => println!("  {input} => not covered (get_rate is None: {})", get_rate(input).is_none()),
        }
    }
}
