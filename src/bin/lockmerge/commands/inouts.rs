//! `lockmerge inouts` command

use std::io::IsTerminal;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::{GlobalArgs, InoutsArgs};
use crate::commands::package_manager;
use lockmerge::util::diagnostic::emit;
use lockmerge::util::RootedPath;

#[derive(Serialize)]
struct InoutsOutput<'a> {
    errors: Vec<String>,
    inputs: &'a [RootedPath],
    outputs: &'a [RootedPath],
}

pub fn execute(args: InoutsArgs, global: &GlobalArgs) -> Result<()> {
    let pm = package_manager(global)?;
    let io = pm.compute_inputs_outputs(args.local)?;

    if args.json {
        let output = InoutsOutput {
            errors: io.errors.iter().map(ToString::to_string).collect(),
            inputs: &io.inputs,
            outputs: &io.outputs,
        };
        let json = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("Inputs:");
        for input in &io.inputs {
            println!("  {}", input);
        }
        println!("Outputs:");
        for output in &io.outputs {
            println!("  {}", output);
        }
    }

    if !io.errors.is_empty() {
        let color = !global.no_color && std::io::stderr().is_terminal();
        for e in &io.errors {
            emit(&e.to_diagnostic(), color);
        }
        std::process::exit(1);
    }

    Ok(())
}
