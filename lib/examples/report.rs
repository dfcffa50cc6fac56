use anyhow::Context;
use labeled_grid::IngestPolicy;
use labeled_grid::LabeledGrid;
use labeled_grid::XIndex;
use labeled_grid::YIndex;

// =================
// === Mock Data ===
// =================

const MONTHS: &[&str] = &["Jan", "Feb", "Mar", "Apr"];
const REGIONS: &[&str] = &["north", "south", "east"];

fn sales() -> Vec<(u32, &'static str, &'static str)> {
    vec![
        (120, "Jan", "north"),
        (95, "Feb", "north"),
        (143, "Mar", "south"),
        (80, "Jan", "east"),
        (101, "Apr", "east"),
    ]
}

type Report = LabeledGrid<u32, &'static str, &'static str>;

// ==============
// === Render ===
// ==============

fn render(report: &Report) -> String {
    let mut out = " ".repeat(8);
    for month in report.x_labels() {
        out.push_str(&format!("{month:>6}"));
    }
    for element in report {
        if *element.position.x() == 0 {
            out.push_str(&format!("\n{:>8}", element.y_label));
        }
        let cell = element.item.map(u32::to_string).unwrap_or_else(|| "-".into());
        out.push_str(&format!("{cell:>6}"));
    }
    out
}

// ============
// === Main ===
// ============

fn main() -> anyhow::Result<()> {
    let mut report = LabeledGrid::from_entries_with(
        IngestPolicy::Strict,
        MONTHS.iter().copied(),
        REGIONS.iter().copied(),
        sales(),
    )
    .context("Sales data references an unknown month or region.")?;
    println!("{}\n", render(&report));

    let baseline = report.clone();
    report.insert("May", "west", 64);
    if let Some(total) = report.get_mut("Jan", "north") {
        *total += 10;
    }
    let last = XIndex(report.width() - 1);
    report.set_at(last, YIndex(0), Some(77)).context("Column out of range.")?;
    println!("{}\n", render(&report));

    println!("Baseline is untouched:\n{}", render(&baseline));
    Ok(())
}
