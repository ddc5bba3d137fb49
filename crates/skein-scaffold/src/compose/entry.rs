//! src/index.ts, the generated program's entry point

use super::{render, Artifact, ArtifactKind};
use crate::error::Result;
use crate::fragments::imports::{DATABASE_CLASS, ENGINE_CLASS, EXAMPLES_MODULE};
use crate::fragments::{
    select_display, select_env_vars, select_imports, select_runtime_config, Display,
};
use crate::options::ProjectOptions;
use crate::product::Framework;
use serde::Serialize;

const ENTRY_TEMPLATE: &str = r#"import 'dotenv/config';
import { {{framework_names}} } from '{{package}}';
{{#if collectors}}
import { {{collectors}} } from '{{examples_module}}';
{{/if}}

type EnvSpec = {
  required: boolean;
  default?: string;
  kind: 'string' | 'port' | 'url';
};

function loadEnv<S extends Record<string, EnvSpec>>(schema: S): Record<keyof S, string> {
  const problems: string[] = [];
  const values: Record<string, string> = {};

  for (const [name, spec] of Object.entries(schema)) {
    const raw = process.env[name] || spec.default;
    if (raw === undefined) {
      if (spec.required) problems.push(`${name} is required`);
      continue;
    }
    if (spec.kind === 'port' && !/^\d+$/.test(raw)) {
      problems.push(`${name} must be a port number, got '${raw}'`);
    }
    if (spec.kind === 'url') {
      try {
        new URL(raw);
      } catch {
        problems.push(`${name} must be a valid URL, got '${raw}'`);
      }
    }
    values[name] = raw;
  }

  if (problems.length > 0) {
    console.error('Invalid environment configuration:');
    for (const problem of problems) console.error(`  - ${problem}`);
    console.error('Copy .env.example to .env and fill in the missing values.');
    process.exit(1);
  }

  return values as Record<keyof S, string>;
}

const ENV_SCHEMA = {
{{#each env}}
  {{name}}: { required: {{required}}{{#if default}}, default: '{{default}}'{{/if}}, kind: '{{kind}}' },
{{/each}}
} satisfies Record<string, EnvSpec>;

const env = loadEnv(ENV_SCHEMA);

const storage = new {{storage_class}}({{storage_config}});

const database = new {{database_class}}({{database_config}});

const queue = new {{queue_class}}({{queue_config}});

const engine = new {{engine_class}}({
  storage,
  database,
  queue,
{{#if collectors}}
  collectors: [{{collector_instances}}],
{{/if}}
});

await engine.start({ port: Number(env.PORT) });

console.log(`{{project_name}} running on http://localhost:${env.PORT}`);
console.log('  Database: {{display.database}}');
console.log('  Storage:  {{display.storage}}');
console.log('  Queue:    {{display.queue}}');

const shutdown = async (signal: NodeJS.Signals) => {
  console.log(`Received ${signal}, stopping engine...`);
  await engine.stop();
  process.exit(0);
};

process.once('SIGINT', () => void shutdown('SIGINT'));
process.once('SIGTERM', () => void shutdown('SIGTERM'));
"#;

#[derive(Serialize)]
struct SchemaEntry {
    name: &'static str,
    required: bool,
    default: Option<String>,
    kind: &'static str,
}

#[derive(Serialize)]
struct EntryContext {
    project_name: String,
    package: String,
    framework_names: String,
    collectors: String,
    collector_instances: String,
    examples_module: &'static str,
    env: Vec<SchemaEntry>,
    storage_class: &'static str,
    storage_config: String,
    database_class: &'static str,
    database_config: String,
    queue_class: &'static str,
    queue_config: String,
    engine_class: &'static str,
    display: Display,
}

/// Compose the entry point: validate env, build adapters, start and stop the engine
pub fn compose_entry_point(options: &ProjectOptions, framework: &Framework) -> Result<Artifact> {
    let runtime = select_runtime_config(options);
    let imports = select_imports(options);

    let env = select_env_vars(options)
        .into_iter()
        .map(|var| SchemaEntry {
            name: var.name,
            required: var.required,
            default: var.default,
            kind: var.kind.as_str(),
        })
        .collect();

    let collector_instances: Vec<String> = imports
        .collectors
        .iter()
        .map(|class| format!("new {}()", class))
        .collect();

    let context = EntryContext {
        project_name: options.project_name().to_string(),
        package: framework.package.clone(),
        framework_names: imports.framework_names().join(", "),
        collectors: imports.collectors.join(", "),
        collector_instances: collector_instances.join(", "),
        examples_module: EXAMPLES_MODULE,
        env,
        storage_class: imports.storage_class,
        storage_config: runtime.storage.to_value().render(0),
        database_class: DATABASE_CLASS,
        database_config: runtime.database.to_value().render(0),
        queue_class: imports.queue_class,
        queue_config: runtime
            .queue
            .to_value()
            .map(|v| v.render(0))
            .unwrap_or_default(),
        engine_class: ENGINE_CLASS,
        display: select_display(options),
    };

    render(ArtifactKind::EntryPoint, ENTRY_TEMPLATE, &context)
}
