use crate::*;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const SKYBLUE: RGBColor = RGBColor(135, 206, 235);

/// One bar per sequenced process: `(process, step it ran at)`, sorted
/// by process id so that rows read top to bottom as P0, P1, ...
pub fn timeline(s: &SafetyOutcome) -> Vec<(ProcessId, usize)> {
    s.sequence
        .iter()
        .enumerate()
        .map(|(step, &p)| (p, step))
        .sorted()
        .collect()
}

/// Renders the safe sequence as a Gantt-style chart. Only meaningful
/// for a complete sequence; a stalled search is reported as text.
pub fn draw(path: &Path, s: &SafetyOutcome) -> Result<()> {
    ensure!(s.is_safe(), "No safe sequence to chart, {} processes are stuck", s.deadlocked.len());
    let rows = timeline(s);
    let steps = s.sequence.len();

    let height = (rows.len() as u32 * 48).max(240) + 120;
    let root = BitMapBackend::new(path, (900, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = rows.iter()
        .map(|(p, _)| p.to_string())
        .collect();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Banker's Algorithm - Gantt Chart of Safe Sequence (Sorted by Process ID)",
            ("sans-serif", 20),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..steps as f64, -0.5f64..rows.len() as f64 - 0.5)?;

    chart
        .configure_mesh()
        .x_desc("Sequence Step")
        .x_labels(steps + 1)
        .y_labels(rows.len())
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| row_label(&labels, *y))
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(row, (_, step))| {
        let (x, y) = (*step as f64, row as f64);
        Rectangle::new([(x, y - 0.4), (x + 1.0, y + 0.4)], SKYBLUE.filled())
    }))?;
    chart.draw_series(rows.iter().enumerate().map(|(row, (p, step))| {
        Text::new(
            p.to_string(),
            (*step as f64 + 0.5, row as f64),
            ("sans-serif", 16).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;
    root.present()?;

    Ok(())
}

// Tick positions are chosen by plotters, so only label the ones that
// land on a row.
fn row_label(labels: &[String], y: f64) -> String {
    let r = y.round();
    if (y - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    labels.get(r as usize).cloned().unwrap_or_default()
}
