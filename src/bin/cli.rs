use course_catalog::view::{
    DayLabels, render_chart_summary, render_course_detail, render_course_table,
    render_semester_tab, render_weekly_grid,
};
use course_catalog::{
    Catalog, CatalogConfig, CourseSource, FavoritesStore, FileBlobStore, GridConfig, MatchPolicy,
    SearchCriteria, WeeklyGrid, hit_test, project_schedule, save_courses_to_json,
};
use std::fs;
use std::io::{self, Write};
use std::str::FromStr;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

type Favorites = FavoritesStore<FileBlobStore>;

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <path|url>                    Load a catalog CSV (or exported JSON)\n  show                               List courses matching the current search\n  search [text...]                   Keyword search over name, instructor, comments\n  dept <name...|all>                 Filter by department\n  term <name...|all>                 Filter by term\n  reset                              Clear all search filters\n  facets                             List departments, terms and semesters\n  detail <id>                        Show one course\n  fav <id>                           Toggle a favorite\n  favs                               List favorite courses\n  board [semester]                   Favorites by semester (Spring, Fall, January)\n  schedule [exact|overlap] [part...] Weekly grid of favorites (optionally one term part)\n  policy [exact|overlap]             Show or set the default time matching policy\n  labels en|ja                       Day column headers for the weekly grid\n  chart                              Rating/workload summary for the current search\n  pick <x> <y> [radius]              Select the chart point nearest to workload x, rating y\n  grid show|default                  Show or reset the weekly grid\n  grid set <json_path>               Load grid config from JSON file\n  grid save <json_path>              Save grid config to JSON file\n  export <json_path>                 Save the current search results as JSON\n  quit|exit                          Exit"
    );
}

fn print_grid_info(grid: &WeeklyGrid) {
    let days = grid
        .days()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let slots = grid
        .slots()
        .iter()
        .map(|s| s.label().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Days               : {}", days);
    println!("Slots              : {}", slots);
}

fn print_criteria(criteria: &SearchCriteria) {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!(
        "Search: query={} department={} term={}",
        show(&criteria.query),
        show(&criteria.department),
        show(&criteria.term)
    );
}

fn show_filtered(catalog: &Catalog, favorites: &Favorites) {
    let courses = catalog.filtered();
    println!("Courses ({})", courses.len());
    print!(
        "{}",
        render_course_table(&courses, |id| favorites.is_favorite(id))
    );
}

fn load_catalog(runtime: Option<&Runtime>, catalog: &mut Catalog, input: &str) {
    let source = CourseSource::parse(input);
    let result = match (&source, runtime) {
        (CourseSource::Url(_), Some(runtime)) => runtime.block_on(source.load()),
        _ => source.load_local(),
    };
    match result {
        Ok(courses) => {
            catalog.replace_records(courses);
            println!("Loaded {} courses from {}.", catalog.len(), source);
        }
        Err(e) => println!("Failed to load courses: {}", e),
    }
}

fn rest_of_line<'a>(parts: impl Iterator<Item = &'a str>) -> Option<String> {
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("Config error: {}. Using defaults.", e);
            CatalogConfig::default()
        }
    };

    let grid = config.weekly_grid().unwrap_or_default();
    let mut policy = config.policy;
    let mut day_labels = DayLabels::default();
    let mut catalog = Catalog::default().with_grid(grid);

    let favorites = match FileBlobStore::new(&config.data_dir)
        .and_then(|store| FavoritesStore::open_with_key(store, config.favorites_key.clone()))
    {
        Ok(favorites) => favorites,
        Err(e) => {
            println!(
                "Cannot open favorites in {}: {}",
                config.data_dir.display(),
                e
            );
            return;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            println!("Remote loading unavailable: {}", e);
            None
        }
    };

    println!("Course Catalog (CLI) - type 'help' for commands\n");
    if let Some(source) = &config.source {
        load_catalog(runtime.as_ref(), &mut catalog, source);
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match rest_of_line(parts) {
                Some(source) => load_catalog(runtime.as_ref(), &mut catalog, &source),
                None => println!("Usage: load <path|url>"),
            },
            "show" => show_filtered(&catalog, &favorites),
            "search" => {
                let mut criteria = catalog.criteria().clone();
                criteria.query = rest_of_line(parts);
                catalog.set_criteria(criteria);
                print_criteria(catalog.criteria());
                show_filtered(&catalog, &favorites);
            }
            "dept" | "term" => match rest_of_line(parts) {
                Some(value) => {
                    let mut criteria = catalog.criteria().clone();
                    if cmd == "dept" {
                        criteria.department = Some(value);
                    } else {
                        criteria.term = Some(value);
                    }
                    catalog.set_criteria(criteria);
                    print_criteria(catalog.criteria());
                    show_filtered(&catalog, &favorites);
                }
                None => println!("Usage: {} <name...|all>", cmd),
            },
            "reset" => {
                catalog.reset_criteria();
                println!("Search reset.");
                show_filtered(&catalog, &favorites);
            }
            "facets" => {
                println!("Departments        : {}", catalog.departments().join(", "));
                println!("Terms              : {}", catalog.terms().join(", "));
                println!("Semesters          : {}", catalog.semesters().join(", "));
            }
            "detail" => match parts.next() {
                Some(id) => match catalog.find(id) {
                    Some(course) => {
                        print!("{}", render_course_detail(course, favorites.is_favorite(id)))
                    }
                    None => println!("Course {} not found.", id),
                },
                None => println!("Usage: detail <id>"),
            },
            "fav" => match parts.next() {
                Some(id) => {
                    if catalog.find(id).is_none() && !favorites.is_favorite(id) {
                        println!("Course {} not found.", id);
                        continue;
                    }
                    match favorites.toggle(id) {
                        Ok(true) => println!("Added {} to favorites.", id),
                        Ok(false) => println!("Removed {} from favorites.", id),
                        Err(e) => println!("Error saving favorites: {}", e),
                    }
                }
                None => println!("Usage: fav <id>"),
            },
            "favs" => {
                let snapshot = favorites.list();
                let courses = catalog.favorites_of(&snapshot);
                println!("Favorites ({})", courses.len());
                if courses.is_empty() {
                    println!("No favorites yet.");
                } else {
                    print!("{}", render_course_table(&courses, |_| true));
                }
            }
            "board" => {
                let snapshot = favorites.list();
                let board = catalog.semester_board(&snapshot);
                match parts.next() {
                    Some(semester) => match board.tab(semester) {
                        Some(tab) => print!("{}", render_semester_tab(tab, |_| true)),
                        None => println!("Unknown semester '{}'. Use Spring, Fall or January.", semester),
                    },
                    None => {
                        for tab in board.tabs() {
                            print!("{}", render_semester_tab(tab, |_| true));
                        }
                    }
                }
            }
            "schedule" => {
                let mut args: Vec<&str> = parts.collect();
                let mut run_policy = policy;
                if let Some(parsed) = args.first().and_then(|s| MatchPolicy::from_str(s).ok()) {
                    run_policy = parsed;
                    args.remove(0);
                }
                let snapshot = favorites.list();
                if args.is_empty() {
                    let projection = catalog.schedule_for(&snapshot, run_policy);
                    println!("Weekly schedule ({} policy)", run_policy);
                    print!("{}", render_weekly_grid(&projection, day_labels));
                    continue;
                }
                let label = args.join(" ");
                let board = catalog.semester_board(&snapshot);
                let part = board
                    .tabs()
                    .iter()
                    .flat_map(|tab| tab.parts.iter())
                    .find(|part| part.label.eq_ignore_ascii_case(&label));
                match part {
                    Some(part) => {
                        let projection =
                            project_schedule(part.courses.iter().copied(), catalog.grid(), run_policy);
                        println!("Weekly schedule for {} ({} policy)", part.label, run_policy);
                        print!("{}", render_weekly_grid(&projection, day_labels));
                    }
                    None => println!("Unknown term part '{}'.", label),
                }
            }
            "labels" => match parts.next() {
                Some("en") => {
                    day_labels = DayLabels::English;
                    println!("Day labels set to English.");
                }
                Some("ja") => {
                    day_labels = DayLabels::Japanese;
                    println!("Day labels set to Japanese.");
                }
                _ => println!("Usage: labels en|ja"),
            },
            "policy" => match parts.next() {
                None => println!("Match policy: {}", policy),
                Some(value) => match MatchPolicy::from_str(value) {
                    Ok(parsed) => {
                        policy = parsed;
                        println!("Match policy set to {}.", policy);
                    }
                    Err(e) => println!("{}", e),
                },
            },
            "chart" => {
                let points = catalog.chart();
                print!("{}", render_chart_summary(&points, &catalog.summary()));
            }
            "pick" => {
                let x = parts.next().and_then(|s| s.parse::<f64>().ok());
                let y = parts.next().and_then(|s| s.parse::<f64>().ok());
                let radius = parts
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
                    .unwrap_or(0.25);
                match (x, y) {
                    (Some(x), Some(y)) => {
                        let points = catalog.chart();
                        match hit_test(&points, x, y, radius).and_then(|p| catalog.find(&p.id)) {
                            Some(course) => print!(
                                "{}",
                                render_course_detail(course, favorites.is_favorite(&course.id))
                            ),
                            None => println!("No course near ({}, {}).", x, y),
                        }
                    }
                    _ => println!("Usage: pick <x> <y> [radius]"),
                }
            }
            "grid" => match parts.next() {
                Some("show") | None => print_grid_info(catalog.grid()),
                Some("default") => {
                    catalog.set_grid(WeeklyGrid::default());
                    println!("Grid reset to default.");
                    print_grid_info(catalog.grid());
                }
                Some("set") => match parts.next() {
                    Some(path) => match fs::read_to_string(path) {
                        Ok(contents) => match serde_json::from_str::<GridConfig>(&contents) {
                            Ok(config) => match WeeklyGrid::from_config(&config) {
                                Ok(grid) => {
                                    catalog.set_grid(grid);
                                    println!("Grid updated from {}.", path);
                                    print_grid_info(catalog.grid());
                                }
                                Err(e) => println!("Error applying grid: {}", e),
                            },
                            Err(e) => println!("Invalid grid JSON: {}", e),
                        },
                        Err(e) => println!("Error reading {}: {}", path, e),
                    },
                    None => println!("Usage: grid set <json_path>"),
                },
                Some("save") => match parts.next() {
                    Some(path) => match serde_json::to_string_pretty(&catalog.grid().to_config()) {
                        Ok(json) => match fs::write(path, json) {
                            Ok(_) => println!("Grid saved to {}.", path),
                            Err(e) => println!("Error writing {}: {}", path, e),
                        },
                        Err(e) => println!("Error serializing grid: {}", e),
                    },
                    None => println!("Usage: grid save <json_path>"),
                },
                Some(other) => {
                    println!("Unknown grid command '{}'.", other);
                    println!("Usage: grid show|default|set <json_path>|save <json_path>");
                }
            },
            "export" => match parts.next() {
                Some(path) => {
                    let courses: Vec<_> = catalog.filtered().into_iter().cloned().collect();
                    match save_courses_to_json(&courses, path) {
                        Ok(_) => println!("Exported {} courses to {}.", courses.len(), path),
                        Err(e) => println!("Error exporting courses: {}", e),
                    }
                }
                None => println!("Usage: export <json_path>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
