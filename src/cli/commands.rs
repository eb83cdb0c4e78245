//! Command dispatch and the demonstration script.

use std::io::{BufRead, Write};

use clap::CommandFactory;
use clap_complete::generate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::cli::args::{Cli, Commands, DemoArgs, ShowArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{DemoConfig, PrintStyle, Settings};
use crate::domain::{BalancedTree, Order, TreeDisplay};

pub fn execute_command<R: BufRead, W: Write>(cli: &Cli, input: &mut R, out: &mut W) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::InvalidArgs("no command given, see --help".into()))?;

    if let Commands::Completion { shell } = command {
        generate(*shell, &mut Cli::command(), "bstree", out);
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(style) = cli.style {
        settings.style = style;
    }
    debug!("settings: {:?}", settings);

    match command {
        Commands::Show(args) => _show(args, settings.style, out),
        Commands::Demo(args) => {
            let demo = apply_demo_args(settings.demo.clone(), args);
            settings.demo = demo;
            settings.validate()?;
            _demo(&settings.demo, settings.style, input, out)
        }
        Commands::Config => _config(&settings, out),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Command-line flags override the loaded demo settings.
pub fn apply_demo_args(mut demo: DemoConfig, args: &DemoArgs) -> DemoConfig {
    if args.seed.is_some() {
        demo.seed = args.seed;
    }
    if let Some(count) = args.count {
        demo.count = count;
    }
    if let Some(min) = args.min {
        demo.min = min;
    }
    if let Some(max) = args.max {
        demo.max = max;
    }
    demo.interactive |= args.interactive;
    demo
}

#[instrument(skip(out))]
pub fn _show<W: Write>(args: &ShowArgs, style: PrintStyle, out: &mut W) -> CliResult<()> {
    let mut tree = BalancedTree::new(args.values.iter().copied());
    for &value in &args.inserts {
        tree.insert(value);
    }
    for value in &args.deletes {
        if !tree.delete(value) {
            output::warning(out, &format!("{} is not in the tree", value))?;
        }
    }
    if args.rebalance {
        tree.rebalance();
    }

    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    report_traversals(&tree, out)?;

    for value in &args.finds {
        match tree.find(value).and_then(|id| tree.depth(id)) {
            Some(depth) => output::success_detail(out, &format!("found {} at depth {}", value, depth))?,
            None => output::failure(out, &format!("{} not found", value))?,
        }
    }
    Ok(())
}

fn _config<W: Write>(settings: &Settings, out: &mut W) -> CliResult<()> {
    output::info(out, &settings.to_toml()?)?;
    Ok(())
}

pub fn render<W: Write>(tree: &BalancedTree<i64>, style: PrintStyle, out: &mut W) -> CliResult<()> {
    match style {
        PrintStyle::Odin => write!(out, "{}", tree.pretty())?,
        PrintStyle::Termtree => write!(out, "{}", tree.to_tree_string())?,
    }
    Ok(())
}

fn report_shape<W: Write>(tree: &BalancedTree<i64>, out: &mut W) -> CliResult<()> {
    let balanced = tree
        .balanced()
        .map_or_else(|| "n/a (empty tree)".to_string(), |b| b.to_string());
    output::action(out, "Is the tree balanced?", &balanced)?;
    let height = tree
        .height()
        .map_or_else(|| "n/a (empty tree)".to_string(), |h| h.to_string());
    output::action(out, "Height", &height)?;
    Ok(())
}

fn report_traversals<W: Write>(tree: &BalancedTree<i64>, out: &mut W) -> CliResult<()> {
    for order in Order::ALL {
        let values: Vec<&i64> = tree.values(order).collect();
        output::info(out, &format!("{:<12} {:?}", format!("{}:", order), values))?;
    }
    Ok(())
}

fn pause<R: BufRead, W: Write>(interactive: bool, input: &mut R, out: &mut W) -> CliResult<()> {
    if interactive {
        output::prompt(out, "Press Enter to continue...")?;
        let mut line = String::new();
        input.read_line(&mut line)?;
    }
    Ok(())
}

fn random_tree(rng: &mut StdRng, demo: &DemoConfig) -> BalancedTree<i64> {
    let values: Vec<i64> = (0..demo.count)
        .map(|_| rng.gen_range(demo.min..=demo.max))
        .collect();
    BalancedTree::new(values)
}

/// Walks through creation, traversal, unbalancing, rebalancing and deletion.
#[instrument(skip(input, out))]
pub fn _demo<R: BufRead, W: Write>(
    demo: &DemoConfig,
    style: PrintStyle,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let seed = demo.seed.unwrap_or_else(rand::random);
    info!(seed, "starting demo");
    output::action(out, "Seed", &seed)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let interactive = demo.interactive;

    // creation, traversal, unbalancing, rebalancing
    output::header(out, "A random tree...")?;
    let mut tree = random_tree(&mut rng, demo);
    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    pause(interactive, input, out)?;
    output::header(out, "Elements in order:")?;
    report_traversals(&tree, out)?;
    pause(interactive, input, out)?;

    output::header(out, "Adding large numbers to unbalance the tree...")?;
    for step in 1..=5 {
        tree.insert(demo.max.saturating_add(20 * step));
    }
    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    pause(interactive, input, out)?;

    output::header(out, "Rebalancing...")?;
    tree.rebalance();
    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    pause(interactive, input, out)?;
    output::header(out, "Elements in order:")?;
    report_traversals(&tree, out)?;
    pause(interactive, input, out)?;

    // visiting
    output::header(out, "A new tree...")?;
    let tree = random_tree(&mut rng, demo);
    render(&tree, style, out)?;
    output::header(out, "Even elements in tree...")?;
    pause(interactive, input, out)?;
    for order in Order::ALL {
        let mut evens = Vec::new();
        tree.visit(order, |node| {
            if node.value() % 2 == 0 {
                evens.push(node.value().to_string());
            }
        });
        output::info(out, &format!("{:<12} {}", format!("{} -", order), evens.join(" : ")))?;
    }

    // root handling on an initially empty tree
    output::header(out, "A new tree...")?;
    let mut tree = BalancedTree::default();
    render(&tree, style, out)?;
    pause(interactive, input, out)?;
    output::header(out, "Add some values one by one...")?;
    for value in 1..=5 {
        tree.insert(value);
    }
    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    pause(interactive, input, out)?;
    output::header(out, "Rebalancing...")?;
    tree.rebalance();
    render(&tree, style, out)?;
    report_shape(&tree, out)?;
    pause(interactive, input, out)?;
    output::header(out, "Removing values...")?;
    for value in [3, 2, 1] {
        tree.delete(&value);
    }
    render(&tree, style, out)?;
    output::header(out, "Removing final two values...")?;
    for value in [4, 5] {
        tree.delete(&value);
    }
    render(&tree, style, out)?;
    output::header(out, "Finished.")?;
    pause(interactive, input, out)?;
    Ok(())
}
