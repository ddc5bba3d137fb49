//! bin/cli.js, a forwarding wrapper around the framework's CLI tool

use super::{render, Artifact, ArtifactKind};
use crate::error::Result;
use crate::options::ProjectOptions;
use crate::product::Framework;
use serde::Serialize;

/// Subcommands listed in the wrapper's help, with their descriptions
pub const FORWARDED_SUBCOMMANDS: &[(&str, &str)] = &[
    ("test", "Run every collector once and print the results"),
    ("dev", "Start the engine with file watching"),
];

const CLI_TEMPLATE: &str = r#"#!/usr/bin/env node
import { spawn } from 'node:child_process';
import { Command } from 'commander';

const TOOL = '{{tool}}';

function forward(args) {
  const child = spawn('npx', ['--no-install', TOOL, ...args], {
    stdio: 'inherit',
    shell: process.platform === 'win32',
  });

  child.on('error', (err) => {
    console.error(`Failed to launch ${TOOL}: ${err.message}`);
    process.exit(1);
  });

  child.on('exit', (code, signal) => {
    if (signal) {
      process.kill(process.pid, signal);
    } else {
      process.exit(code ?? 1);
    }
  });
}

const args = process.argv.slice(2);

if (args.length === 0) {
  const program = new Command()
    .name('{{project_name}}')
    .description('Forwards commands to the {{tool}} CLI');
{{#each subcommands}}
  program.command('{{name}}').description('{{description}}');
{{/each}}
  program.help();
} else {
  forward(args);
}
"#;

#[derive(Serialize)]
struct Subcommand {
    name: &'static str,
    description: &'static str,
}

#[derive(Serialize)]
struct CliContext {
    project_name: String,
    tool: String,
    subcommands: Vec<Subcommand>,
}

/// Compose the wrapper. Everything after the program name, options included, is
/// handed to the tool untouched and the tool's exit status becomes the wrapper's.
/// Only a bare invocation is answered locally, with a help listing.
pub fn compose_cli_wrapper(options: &ProjectOptions, framework: &Framework) -> Result<Artifact> {
    let context = CliContext {
        project_name: options.project_name().to_string(),
        tool: framework.cli_tool.clone(),
        subcommands: FORWARDED_SUBCOMMANDS
            .iter()
            .map(|&(name, description)| Subcommand { name, description })
            .collect(),
    };

    render(ArtifactKind::CliWrapper, CLI_TEMPLATE, &context)
}
