use gsa_core::FeatureGates;

pub fn print(gates: &FeatureGates) -> anyhow::Result<()> {
    println!("{}", render(gates));
    Ok(())
}

fn render(gates: &FeatureGates) -> String {
    gates
        .iter()
        .map(|(feature, enabled)| {
            let mark = if enabled { "on" } else { "off" };
            format!("{:<24} {mark}", feature.as_str())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
