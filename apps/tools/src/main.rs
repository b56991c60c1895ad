use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use server_api::{control_options, render, ApiContext};
use shared::{
    domain::{Measure, PanelKind},
    protocol::{
        BoxViolinControls, Figure, HeatmapControls, PanelControls, PanelDefaults,
        ScatterMatrixControls, TimeSeriesControls,
    },
};
use storage::Dataset;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard-tools")]
struct Cli {
    #[arg(long, default_value = "COVID-19_Death_Counts.csv")]
    dataset: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Row, state and year counts of the loaded dataset.
    Summary,
    /// Print one panel's figure as JSON. Unset flags fall back to the
    /// dashboard's initial selections.
    Render {
        panel: PanelKind,
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Args, Debug, Default)]
struct Selection {
    #[arg(long)]
    measure: Option<Measure>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
    range: Option<Vec<f64>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = ApiContext::new(Dataset::load(&cli.dataset)?, true);

    match cli.command {
        Command::Summary => print!("{}", summary(&ctx)),
        Command::Render { panel, selection } => {
            let figure = render_panel(&ctx, panel, selection)?;
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }
    }

    Ok(())
}

fn summary(ctx: &ApiContext) -> String {
    let dataset = &ctx.dataset;
    let years: Vec<String> = dataset.years().iter().map(i32::to_string).collect();
    format!(
        "rows={}\nstates={}\nyears={}\ncolumns={}\n",
        dataset.len(),
        dataset.states().len(),
        years.join(","),
        dataset.columns().join(",")
    )
}

fn panel_controls(panel: PanelKind, selection: Selection, defaults: PanelDefaults) -> PanelControls {
    let Selection {
        measure,
        state,
        year,
        range,
    } = selection;
    match panel {
        PanelKind::TimeSeries => PanelControls::TimeSeries(TimeSeriesControls {
            measure: measure.unwrap_or(defaults.time_series.measure),
            state: state.unwrap_or(defaults.time_series.state),
        }),
        PanelKind::BoxViolin => PanelControls::BoxViolin(BoxViolinControls {
            measure: measure.unwrap_or(defaults.box_violin.measure),
            state: state.unwrap_or(defaults.box_violin.state),
            range: range.unwrap_or(defaults.box_violin.range),
        }),
        PanelKind::ScatterMatrix => PanelControls::ScatterMatrix(ScatterMatrixControls {
            state: state.unwrap_or(defaults.scatter_matrix.state),
            year: year.unwrap_or(defaults.scatter_matrix.year),
        }),
        PanelKind::Heatmap => PanelControls::Heatmap(HeatmapControls {
            measure: measure.unwrap_or(defaults.heatmap.measure),
        }),
    }
}

fn render_panel(ctx: &ApiContext, panel: PanelKind, selection: Selection) -> Result<Figure> {
    let controls = panel_controls(panel, selection, control_options(ctx).defaults);
    render(ctx, &controls).with_context(|| format!("cannot render {panel}"))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
