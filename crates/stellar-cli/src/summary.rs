use console::Style;
use stellar_core::rename::RenameReport;
use stellar_core::stage::StageEffect;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    skipped: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            skipped: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_effect(stage: &str, effect: &StageEffect) {
    let s = Styles::new();

    match effect {
        StageEffect::Ignored => {
            println!("  {:<14}{}", s.label.apply_to(stage), s.skipped.apply_to("ignored"));
        }
        StageEffect::Persisted { filter, frames } => {
            println!("  {}", s.title.apply_to(stage));
            println!(
                "  {:<14}{} = {}",
                s.label.apply_to("Stored"),
                s.value.apply_to(filter),
                s.value.apply_to(frames)
            );
        }
        StageEffect::NotPersisted(reason) => {
            println!("  {}", s.title.apply_to(stage));
            println!(
                "  {:<14}{}",
                s.label.apply_to("Not stored"),
                s.skipped.apply_to(reason)
            );
        }
        StageEffect::Renamed(report) => print_report(stage, report, &s),
    }
}

fn print_report(stage: &str, report: &RenameReport, s: &Styles) {
    println!();
    println!("  {}", s.title.apply_to(stage));
    println!();

    for (from, to) in &report.renamed {
        let old = from.file_name().unwrap_or_default().to_string_lossy();
        let new = to.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} -> {}", s.path.apply_to(old), s.path.apply_to(new));
    }
    for skipped in &report.skipped {
        println!("  {}", s.skipped.apply_to(skipped));
    }

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Renamed"),
        s.value.apply_to(report.renamed.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Skipped"),
        s.value.apply_to(report.skipped.len())
    );
    if report.out_of_scope > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Other filters"),
            s.value.apply_to(report.out_of_scope)
        );
    }
}
