use crate::*;
use plotters::coord::Shift;
use plotters::prelude::*;

const CORNFLOWER:   RGBColor = RGBColor(100, 149, 237);
const SALMON:       RGBColor = RGBColor(250, 128, 114);

type Pane<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Two bar charts side by side: total fragmentation and execution time
/// of every strategy that ran.
pub fn draw_comparison(path: &Path, runs: &[StrategyRun]) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Fragmentation & Execution Time", ("sans-serif", 26))?;
    let panes = root.split_evenly((1, 2));

    let names: Vec<&str> = runs.iter()
        .map(|r| r.strategy.name())
        .collect();
    let frags: Vec<f64> = runs.iter()
        .map(|r| r.outcome.fragmentation as f64)
        .collect();
    let times: Vec<f64> = runs.iter()
        .map(|r| r.elapsed_secs)
        .collect();

    bar_chart(&panes[0], "Fragmentation Comparison", "Total Fragmentation", &names, &frags, CORNFLOWER)?;
    bar_chart(&panes[1], "Execution Time Comparison", "Time (seconds)", &names, &times, SALMON)?;
    root.present()?;

    Ok(())
}

fn bar_chart(
    pane:   &Pane<'_>,
    title:  &str,
    y_desc: &str,
    names:  &[&str],
    values: &[f64],
    color:  RGBColor,
) -> Result<()> {
    let peak = values.iter().copied().fold(0.0, f64::max);
    // Leave some headroom above the tallest bar; an all-zero series
    // still needs a non-empty range.
    let y_top = if peak > 0.0 { peak * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(pane)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0..names.len()).into_segmented(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Strategy")
        .y_desc(y_desc)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i)   => { names.get(*i).map(|n| n.to_string()).unwrap_or_default() },
            _                           => { String::new() },
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.filled())
            .margin(20)
            .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
    )?;

    Ok(())
}
