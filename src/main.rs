//! Service entry point.
//!
//! Startup is strictly staged: configuration, logging, the three input
//! loads, aggregation, the persisted artifact, then the interactive
//! session. Any malformed input aborts before a controller exists — the
//! user never sees a partially loaded map.
//!
//! The session loop reads selection commands from stdin, standing in for
//! the slider/dropdown widget surface, and forwards them to the controller
//! as the same three change events the widgets would emit.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::info;

use wxmap_service::analysis::aggregate::{build_county_monthly, write_aggregate_csv};
use wxmap_service::config::AppConfig;
use wxmap_service::controller::{SelectionController, SelectionEvent};
use wxmap_service::ingest::geometry::CountyGeometryStore;
use wxmap_service::ingest::observations::load_observations;
use wxmap_service::logging;
use wxmap_service::model::StatKind;
use wxmap_service::plot::{make_figure, MapFigure};
use wxmap_service::stations::StationCountyIndex;

/// One parsed line of session input.
#[derive(Debug, PartialEq)]
enum Command {
    Event(SelectionEvent),
    Show,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match (words.next()?, words.next()) {
        ("quit" | "exit", None) => Some(Command::Quit),
        ("show", None) => Some(Command::Show),
        ("year", Some(value)) => value
            .parse()
            .ok()
            .map(|y| Command::Event(SelectionEvent::YearChanged(y))),
        ("month", Some(value)) => Some(Command::Event(SelectionEvent::MonthChanged(
            value.to_string(),
        ))),
        // The widgets emit full display labels; translate the short forms
        // this loop accepts into them.
        ("stat", Some("max")) => Some(Command::Event(SelectionEvent::StatisticChanged(
            StatKind::Max.display_label().to_string(),
        ))),
        ("stat", Some("min")) => Some(Command::Event(SelectionEvent::StatisticChanged(
            StatKind::Min.display_label().to_string(),
        ))),
        _ => None,
    }
}

fn run_session(controller: &mut SelectionController<MapFigure>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("commands: year <2016-2020> | month <Jan..Dec> | stat <max|min> | show | quit");
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF behaves like quit
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Show) => {
                let filter = controller.filter();
                let style = controller.surface().style();
                println!(
                    "selection: year={} month={} stat={} | figure: '{}' ({} byte payload)",
                    filter.year,
                    filter.month,
                    filter.stat.field_name(),
                    style.figure_title(),
                    controller.surface().dataset_geojson().map_or(0, str::len),
                );
            }
            Some(Command::Event(event)) => controller.handle_event(event),
            None => println!("unrecognized command: {}", line.trim()),
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("wxmap.toml"), PathBuf::from);
    let config = if config_path.exists() {
        AppConfig::load(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?
    } else {
        AppConfig::default()
    };

    logging::init(config.level_filter()?, config.log_file.as_deref())?;

    let index = StationCountyIndex::from_csv_path(&config.stations_csv)
        .context("loading station reference file")?;
    info!("station index: {} stations linked to counties", index.len());

    let records =
        load_observations(&config.weather_csv).context("loading raw observations")?;
    info!("loaded {} daily temperature observations", records.len());

    let aggregates = build_county_monthly(&records, &index);
    write_aggregate_csv(&config.aggregate_csv, &aggregates)
        .context("writing aggregate artifact")?;
    info!(
        "wrote aggregate artifact: {}",
        config.aggregate_csv.display()
    );

    let geometry = CountyGeometryStore::from_geojson_path(&config.geometry_geojson)
        .context("loading county geometry")?;
    info!("geometry store: {} county boundaries", geometry.len());

    let figure = make_figure(StatKind::Max);
    let mut controller = SelectionController::new(aggregates, geometry, figure);
    controller.publish_current();

    run_session(&mut controller)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_commands() {
        assert_eq!(
            parse_command("year 2019"),
            Some(Command::Event(SelectionEvent::YearChanged(2019)))
        );
        assert_eq!(
            parse_command("month Mar"),
            Some(Command::Event(SelectionEvent::MonthChanged("Mar".to_string())))
        );
        assert_eq!(
            parse_command("stat min"),
            Some(Command::Event(SelectionEvent::StatisticChanged(
                "Average Minimum Temperature".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_control_commands() {
        assert_eq!(parse_command("show"), Some(Command::Show));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_garbage_lines_are_not_commands() {
        assert_eq!(parse_command("year twenty"), None);
        assert_eq!(parse_command("stat median"), None);
        assert_eq!(parse_command("refresh"), None);
    }
}
