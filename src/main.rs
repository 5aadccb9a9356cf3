// Entry point and high-level console flow.
//
// The binary stands in for the browser dashboard:
// - Option [1] loads every dataset and prints per-dataset diagnostics.
// - Option [2] computes the chart views for the configured selection,
//   writes them as JSON (flat views also as CSV) and prints table previews.
// - After generating views, the user can go back to the menu or exit.
use std::io::{self, Write};

use labor_dashboard::catalog;
use labor_dashboard::config::DashboardConfig;
use labor_dashboard::filter::filter_records;
use labor_dashboard::join::{build_composite, build_scatter, CompositeVariant, IndicatorRecords};
use labor_dashboard::loader::{load_all, load_minimum_wages, DirSource, LoadedDatasets};
use labor_dashboard::output;
use labor_dashboard::reports;
use labor_dashboard::reshape::reshape;
use labor_dashboard::types::{DatasetKey, MinimumWageRecord};
use labor_dashboard::util;
use labor_dashboard::wage;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Data loaded by option [1], reused by every later report run.
struct Session {
    config: DashboardConfig,
    datasets: Option<LoadedDatasets>,
    minimum_wages: Vec<MinimumWageRecord>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
///
/// Returns `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: fetch, parse and normalize every dataset.
fn handle_load(session: &mut Session) {
    let source = DirSource::new(&session.config.data_dir);
    match load_all(&source) {
        Ok(loaded) => {
            for desc in catalog::descriptors() {
                if let Some(ds) = loaded.get(desc.key) {
                    println!(
                        "{:<45} {} rows read, {} retained",
                        desc.title,
                        util::format_int(ds.report.rows_read),
                        util::format_int(ds.report.rows_retained)
                    );
                }
            }
            for (key, e) in &loaded.failures {
                println!("Warning: {} unavailable ({})", key, e);
            }
            println!(
                "Loaded {} observations.\n",
                util::format_int(loaded.total_records())
            );
            session.datasets = Some(loaded);
        }
        Err(e) => {
            error!(error = %e, "dataset load failed");
            eprintln!("Failed to load data: {}. Check the data directory and retry.\n", e);
        }
    }

    session.minimum_wages = match load_minimum_wages(&source) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "minimum wage table unavailable");
            Vec::new()
        }
    };
}

/// Handle option [2]: compute every view and export it.
///
/// Writes JSON files to the output directory and prints Markdown previews.
fn handle_generate_views(session: &Session) {
    let Some(loaded) = &session.datasets else {
        println!("Error: No data loaded. Please load the datasets first (option 1).\n");
        return;
    };
    let sel = &session.config.selection;
    let out_dir = &session.config.output_dir;
    let write = |name: &str, result: Result<(), Box<dyn std::error::Error>>| {
        if let Err(e) = result {
            eprintln!("Write error ({}): {}", name, e);
        }
    };

    for desc in catalog::descriptors() {
        let filtered = filter_records(loaded.records(desc.key), sel, desc.key);
        let rows = reshape(&filtered, &sel.selected_countries);
        let stats = reports::summarize(&rows, &sel.selected_countries, desc.unit);

        let file = format!("chart_{}.json", desc.key);
        write(&file, output::write_json(&out_dir.join(&file), &rows));
        let distribution = serde_json::json!({
            "averages": reports::country_averages(&rows, &sel.selected_countries),
            "latestYear": reports::latest_year_slices(&rows, &sel.selected_countries),
        });
        let file = format!("distribution_{}.json", desc.key);
        write(&file, output::write_json(&out_dir.join(&file), &distribution));
        println!("{} ({} - {})", desc.title, sel.year_range.0, sel.year_range.1);
        output::preview_table_rows(&[stats], 1);
    }

    let scatter = build_scatter(
        &sel.selected_countries,
        sel.sex,
        sel.age_group,
        loaded.records(DatasetKey::Employment),
        loaded.records(DatasetKey::Unemployment),
    );
    write("scatter.json", output::write_json(&out_dir.join("scatter.json"), &scatter));
    write("scatter.csv", output::write_csv(&out_dir.join("scatter.csv"), &scatter));
    println!("Employment vs. Unemployment (latest year per country)");
    output::preview_table_rows(&scatter, 12);

    let indicators = IndicatorRecords::from_loaded(loaded);
    let radar = build_composite(
        &sel.selected_countries,
        sel.sex,
        sel.age_group,
        &indicators,
        CompositeVariant::Radar,
    );
    write("radar.json", output::write_json(&out_dir.join("radar.json"), &radar));
    write("radar.csv", output::write_csv(&out_dir.join("radar.csv"), &radar));
    println!("Indicator Profile (salary shown / 100)");
    output::preview_table_rows(&radar, 3);

    let salary = loaded.records(DatasetKey::Salary);
    if let Some(&year) = wage::available_gap_years(salary).first() {
        let gaps = wage::compute_gaps(salary, year);
        write("wage_gap.json", output::write_json(&out_dir.join("wage_gap.json"), &gaps));
        write("wage_gap.csv", output::write_csv(&out_dir.join("wage_gap.csv"), &gaps));
        println!("Gender Wage Gap ({})", year);
        output::preview_table_rows(&gaps, 12);
    }

    if let Some(country) = sel.selected_countries.first() {
        let timeline = wage::gender_timeline(
            loaded.records(DatasetKey::LaborForce),
            salary,
            country,
            sel.year_range,
        );
        write("gender_timeline.json", output::write_json(&out_dir.join("gender_timeline.json"), &timeline));
    }

    let informal = loaded.records(DatasetKey::Informal);
    if let Some(&year) = reports::choropleth_years(informal).first() {
        let cells = reports::choropleth(informal, year);
        write("informal_map.json", output::write_json(&out_dir.join("informal_map.json"), &cells));
        println!("Informal employment map: {} countries ({})\n", cells.len(), year);
    }

    if !session.minimum_wages.is_empty() {
        write(
            "minimum_wages.csv",
            output::write_csv(&out_dir.join("minimum_wages.csv"), &session.minimum_wages),
        );
        println!("Minimum Wage vs. Average Income (2025)");
        output::preview_table_rows(&session.minimum_wages, 12);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut session = Session {
        config: DashboardConfig::from_args(std::env::args().skip(1)),
        datasets: None,
        minimum_wages: Vec::new(),
    };

    loop {
        println!("South America Labor Dashboard");
        println!("[1] Load datasets");
        println!("[2] Generate dashboard views\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&mut session),
            "2" => {
                println!();
                handle_generate_views(&session);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}
