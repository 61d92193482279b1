use box_packer::render;
use box_packer::{
    Container, Dimensions, Item, ItemGroup, PackRequest, Solution, Solver, SolverConfig,
};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "box_packer",
    about = "Greedy 3D box packing into a catalog of containers"
)]
struct Cli {
    /// Container types as WxHxD[:name] (e.g. 500x500x300:large 300x300x300)
    #[arg(long = "box", num_args = 1.., required_unless_present = "input")]
    boxes: Vec<String>,

    /// Items as WxHxD:qty[:name] (e.g. 200x100x100:4:book)
    #[arg(long = "item", num_args = 1.., required_unless_present = "input")]
    items: Vec<String>,

    /// JSON request file with containers, items and an optional empty_space_ratio
    #[arg(long, conflicts_with_all = ["boxes", "items"])]
    input: Option<String>,

    /// Safety margin (>= 1) on remaining volume when opening a container
    #[arg(long)]
    ratio: Option<f64>,

    /// Show a top-down ASCII layout of each container
    #[arg(long)]
    layout: bool,

    /// Print the solution as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log every placement step to stderr
    #[arg(long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<Dimensions, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("invalid dimensions '{}', expected WxHxD", s));
    }
    let mut values = [0.0; 3];
    for (value, (part, axis)) in values
        .iter_mut()
        .zip(parts.iter().zip(["width", "height", "depth"]))
    {
        *value = part
            .parse::<f64>()
            .map_err(|_| format!("invalid {} in '{}'", axis, s))?;
    }
    let dims = Dimensions::new(values[0], values[1], values[2]);
    if !dims.is_valid() {
        return Err(format!("dimensions must be positive in '{}'", s));
    }
    Ok(dims)
}

fn parse_box(s: &str, idx: usize) -> Result<Container, String> {
    let (dims, name) = match s.split_once(':') {
        Some((dims, name)) => (dims, name.to_string()),
        None => (s, format!("Box {}", idx + 1)),
    };
    Ok(Container::new(
        format!("box-{}", idx + 1),
        name,
        parse_dimensions(dims)?,
    ))
}

fn parse_item(s: &str, idx: usize) -> Result<ItemGroup, String> {
    let parts: Vec<&str> = s.splitn(3, ':').collect();
    if parts.len() < 2 {
        return Err(format!("invalid item '{}', expected WxHxD:qty[:name]", s));
    }
    let dims = parse_dimensions(parts[0])?;
    let qty = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if qty == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let name = parts
        .get(2)
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("Item {}", idx + 1));
    Ok(ItemGroup::new(
        Item::new(format!("item-{}", idx + 1), name, dims),
        qty,
    ))
}

fn build_request(cli: &Cli) -> Result<PackRequest, String> {
    let mut request = match &cli.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("could not read '{}': {}", path, e))?;
            serde_json::from_str::<PackRequest>(&raw)
                .map_err(|e| format!("could not parse '{}': {}", path, e))?
        }
        None => PackRequest {
            containers: cli
                .boxes
                .iter()
                .enumerate()
                .map(|(i, b)| parse_box(b, i))
                .collect::<Result<Vec<_>, _>>()?,
            items: cli
                .items
                .iter()
                .enumerate()
                .map(|(i, it)| parse_item(it, i))
                .collect::<Result<Vec<_>, _>>()?,
            empty_space_ratio: None,
        },
    };
    if cli.ratio.is_some() {
        request.empty_space_ratio = cli.ratio;
    }
    Ok(request)
}

fn print_solution(solution: &Solution, layout: bool) {
    for (i, packed) in solution.boxes.iter().enumerate() {
        println!(
            "Box {} ({}, {}):",
            i + 1,
            packed.container.name,
            packed.container.dimensions
        );
        for block in &packed.packed_items {
            let names: Vec<String> = block
                .item_groups
                .iter()
                .map(|ig| format!("{} x{}", ig.item.name, ig.quantity))
                .collect();
            println!(
                "  [{}] {} @ ({}, {}, {}): {}",
                block.pattern,
                block.dimensions,
                block.offset.x,
                block.offset.y,
                block.offset.z,
                names.join(", ")
            );
        }
        if layout {
            print!(
                "{}",
                render::render_box(packed.container.dimensions, &packed.packed_items)
            );
        }
        println!();
    }

    println!(
        "Summary: {} box{} used, {} items, at most {} per box, {:.1}% space used",
        solution.box_count(),
        if solution.box_count() == 1 { "" } else { "es" },
        solution.item_count(),
        solution.most_items_per_box(),
        solution.space_used_percent(),
    );
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let request = build_request(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let solution = Solver::new(SolverConfig::from_env())
        .solve(&request)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if cli.json {
        match serde_json::to_string_pretty(&solution) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_solution(&solution, cli.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(
            parse_dimensions("500x300x100.5").unwrap(),
            Dimensions::new(500.0, 300.0, 100.5)
        );
        assert!(parse_dimensions("500x300").is_err());
        assert!(parse_dimensions("500x0x1").is_err());
        assert!(parse_dimensions("axbxc").is_err());
    }

    #[test]
    fn test_parse_box() {
        let named = parse_box("10x20x30:crate", 0).unwrap();
        assert_eq!(named.name, "crate");
        assert_eq!(named.id, "box-1");
        let unnamed = parse_box("10x20x30", 2).unwrap();
        assert_eq!(unnamed.name, "Box 3");
    }

    #[test]
    fn test_parse_item() {
        let ig = parse_item("1x2x3:4:widget: blue", 0).unwrap();
        assert_eq!(ig.quantity, 4);
        assert_eq!(ig.item.name, "widget: blue");
        assert_eq!(ig.item.dimensions, Dimensions::new(1.0, 2.0, 3.0));
        assert_eq!(parse_item("1x2x3:1", 4).unwrap().item.name, "Item 5");
        assert!(parse_item("1x2x3", 0).is_err());
        assert!(parse_item("1x2x3:0", 0).is_err());
    }

    #[test]
    fn test_build_request_from_args() {
        let cli = Cli::parse_from([
            "box_packer",
            "--box",
            "100x100x100",
            "--item",
            "50x100x100:2",
            "--ratio",
            "1.0",
        ]);
        let request = build_request(&cli).unwrap();
        assert_eq!(request.containers.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.empty_space_ratio, Some(1.0));
    }
}
