use clap::{Args, Parser, Subcommand};
use log::debug;
use survey_grid::{
    crs::{CoordinateTransform, Crs},
    geometry::{Extent, Point},
    grid::nearest_lattice_point,
    io::geojson::write_grid_geojson,
    sphere::DistanceMetric,
    GridEngine, GridError, GridOptions, MapServices, MapView,
};

#[derive(Parser)]
#[command(name = "survey_grid_cli", version)]
struct Cli {
    /// Map projection as EPSG:CODE or a PROJ definition (overrides the config file)
    #[arg(long, global = true, value_parser = parse_crs)]
    crs: Option<Crs>,
    /// Treat map units as planar meters instead of a spherical-earth projection
    #[arg(long, global = true)]
    planar: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GridArgs {
    /// JSON file with grid options
    #[arg(long)]
    config: Option<String>,
    /// Grid origin as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    origin: Option<Point>,
    /// Rotation anchor as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    anchor: Option<Point>,
    /// Cell size along the grid's x axis
    #[arg(long)]
    x_size: Option<f64>,
    /// Cell size along the grid's y axis
    #[arg(long)]
    y_size: Option<f64>,
    /// Maximum number of points per side
    #[arg(long)]
    max_points: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the grid points inside a viewport.
    Points {
        #[command(flatten)]
        grid: GridArgs,
        /// Viewport as MINX,MINY,MAXX,MAXY
        #[arg(long, value_parser = parse_extent, allow_hyphen_values = true)]
        extent: Extent,
        /// Also write the points as a GeoJSON MultiPoint feature
        #[arg(long)]
        geojson: Option<String>,
    },
    /// Print the rise and run factors of the grid.
    Describe {
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Snap a coordinate to the nearest grid point.
    #[command(allow_negative_numbers = true)]
    Snap {
        x: f64,
        y: f64,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Write default grid options to a JSON file.
    InitConfig { path: String },
}

impl Commands {
    fn grid_args(&self) -> Option<&GridArgs> {
        match self {
            Commands::Points { grid, .. }
            | Commands::Describe { grid }
            | Commands::Snap { grid, .. } => Some(grid),
            Commands::InitConfig { .. } => None,
        }
    }
}

fn parse_numbers(s: &str, count: usize) -> Result<Vec<f64>, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{}: {}", v.trim(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != count {
        return Err(format!("expected {} comma-separated values", count));
    }
    Ok(values)
}

fn parse_point(s: &str) -> Result<Point, String> {
    let v = parse_numbers(s, 2)?;
    Ok(Point::new(v[0], v[1]))
}

fn parse_extent(s: &str) -> Result<Extent, String> {
    let v = parse_numbers(s, 4)?;
    let extent = Extent::new(v[0], v[1], v[2], v[3]);
    if extent.is_empty() {
        return Err("extent minimum exceeds maximum".into());
    }
    Ok(extent)
}

fn parse_crs(s: &str) -> Result<Crs, String> {
    if s.trim().is_empty() {
        return Err("empty projection".into());
    }
    Ok(Crs::from_definition(s))
}

fn print_point(p: Point) {
    println!("{:.3},{:.3}", p.x, p.y);
}

fn grid_options(args: &GridArgs, crs: Option<&Crs>) -> Result<GridOptions, GridError> {
    let mut opts = match &args.config {
        Some(path) => GridOptions::load(path)?,
        None => GridOptions::default(),
    };
    if let Some(origin) = args.origin {
        opts.origin = origin;
    }
    if args.anchor.is_some() {
        opts.rotation_anchor = args.anchor;
    }
    if let Some(x) = args.x_size {
        opts.x_grid_size = x;
    }
    if let Some(y) = args.y_size {
        opts.y_grid_size = y;
    }
    if let Some(max) = args.max_points {
        opts.max_points_per_side = max;
    }
    if let Some(crs) = crs {
        opts.projection = crs.clone();
    }
    debug!("resolved grid options: {:?}", opts);
    Ok(opts)
}

/// Attaches a fresh engine to a view of `extent` in the configured projection.
fn attached_engine<T, M>(
    opts: GridOptions,
    services: MapServices<T, M>,
    extent: Extent,
) -> GridEngine<T, M>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    let view = MapView::new(opts.projection.clone(), extent);
    let mut engine = GridEngine::new(opts, services);
    engine.attach(view);
    engine
}

fn run<T, M>(command: Commands, opts: GridOptions, services: MapServices<T, M>) -> Result<(), GridError>
where
    T: CoordinateTransform,
    M: DistanceMetric,
{
    match command {
        Commands::Points {
            grid,
            extent,
            geojson,
        } => {
            let mut engine = attached_engine(opts, services, extent);
            let points = engine.on_render_frame()?.to_vec();
            for p in &points {
                print_point(*p);
            }
            if let Some(path) = geojson {
                write_grid_geojson(&path, &points)?;
                println!("Wrote {} points to {}", points.len(), path);
            }
        }
        Commands::Describe { .. } => {
            let around = Extent::from_corners(opts.origin, opts.origin);
            let mut engine = attached_engine(opts, services, around);
            match engine.rebuild()? {
                Some(d) => {
                    println!("rise: {:.6}", d.rise_factor);
                    println!("run: {:.6}", d.run_factor);
                }
                None => println!("Grid not renderable"),
            }
        }
        Commands::Snap { x, y, .. } => {
            let target = Point::new(x, y);
            let mut engine = attached_engine(opts, services, Extent::from_corners(target, target));
            engine.rebuild()?;
            let snapped = match (engine.description(), engine.basis()?) {
                (Some(d), Some(basis)) => nearest_lattice_point(d, &basis, target),
                _ => None,
            };
            match snapped {
                Some(p) => print_point(p),
                None => println!("Grid not renderable"),
            }
        }
        Commands::InitConfig { path } => {
            GridOptions::default().save(&path)?;
            println!("Wrote default options to {}", path);
        }
    }
    Ok(())
}

/// Web mercator and WGS84 views use the built-in spherical mercator; any
/// other projection goes through PROJ.
#[cfg(feature = "proj")]
fn run_projected(command: Commands, opts: GridOptions) -> Result<(), GridError> {
    if opts.projection.is_web_mercator() || opts.projection.is_wgs84() {
        run(command, opts, MapServices::spherical())
    } else {
        debug!("using PROJ for {}", opts.projection);
        run(command, opts, MapServices::proj())
    }
}

#[cfg(not(feature = "proj"))]
fn run_projected(command: Commands, opts: GridOptions) -> Result<(), GridError> {
    run(command, opts, MapServices::spherical())
}

fn dispatch(cli: Cli) -> Result<(), GridError> {
    let opts = match cli.command.grid_args() {
        Some(args) => grid_options(args, cli.crs.as_ref())?,
        None => GridOptions::default(),
    };
    if cli.planar {
        run(cli.command, opts, MapServices::planar())
    } else {
        run_projected(cli.command, opts)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
