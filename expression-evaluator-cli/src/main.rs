use anyhow::{Context, Result};
use clap::Parser;
use expression_evaluator::interpreter::evaluator::{evaluate, evaluate_as};
use expression_evaluator::interpreter::{convert, tokens_to_string};
use log::{debug, info};

/// Evaluates the given arithmetic expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, e.g. "3 + 5 * (2 - 8)"
    expression: String,

    /// Print the parsed expression tree
    #[clap(short, long)]
    tree: bool,

    /// Print the expression regenerated from the parsed tree
    #[clap(short, long)]
    normalize: bool,

    /// Evaluate using single precision floating point numbers
    #[clap(long)]
    single_precision: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    debug!("{:?}", args);

    let tree = convert(&args.expression)
        .with_context(|| format!("Could not parse expression '{}'", args.expression))?;
    info!("parsed expression into {} nodes", tree.node_count());

    if args.tree {
        print!("{}", tree);
    }
    if args.normalize {
        println!("{}", tokens_to_string(tree.to_infix())?);
    }

    let context = || format!("Could not evaluate expression '{}'", args.expression);
    if args.single_precision {
        let value = evaluate_as::<f32>(&tree).with_context(context)?;
        println!("{}", value);
    } else {
        let value = evaluate(&tree).with_context(context)?;
        println!("{}", value);
    }
    Ok(())
}
