//! .env.example

use super::{render, Artifact, ArtifactKind};
use crate::error::Result;
use crate::fragments::{select_display, select_env_vars, EnvGroup, EnvVar};
use crate::options::ProjectOptions;
use serde::Serialize;

const ENV_TEMPLATE: &str = "\
# Environment for {{project_name}}
# Copy to .env and replace every placeholder marked (required).
{{#each groups}}

# --- {{heading}} ---
{{#each vars}}
# {{comment}}{{#if required}} (required){{/if}}
{{name}}={{value}}
{{/each}}
{{/each}}
";

#[derive(Serialize)]
struct TemplateLine {
    name: &'static str,
    value: String,
    comment: &'static str,
    required: bool,
}

#[derive(Serialize)]
struct TemplateGroup {
    heading: String,
    vars: Vec<TemplateLine>,
}

#[derive(Serialize)]
struct EnvContext {
    project_name: String,
    groups: Vec<TemplateGroup>,
}

/// Compose the environment template: grouped, commented `KEY=value` lines.
///
/// Required variables carry explanatory placeholders, optional ones their real defaults.
pub fn compose_env_template(options: &ProjectOptions) -> Result<Artifact> {
    let display = select_display(options);

    let mut groups: Vec<TemplateGroup> = Vec::new();
    let mut current: Option<EnvGroup> = None;
    for var in select_env_vars(options) {
        if current != Some(var.group) {
            let heading = match var.group {
                EnvGroup::Server => var.group.heading().to_string(),
                EnvGroup::Database => format!("{} ({})", var.group.heading(), display.database),
                EnvGroup::Storage => format!("{} ({})", var.group.heading(), display.storage),
                EnvGroup::Queue => format!("{} ({})", var.group.heading(), display.queue),
            };
            groups.push(TemplateGroup {
                heading,
                vars: Vec::new(),
            });
            current = Some(var.group);
        }
        if let Some(group) = groups.last_mut() {
            group.vars.push(line(&var));
        }
    }

    let context = EnvContext {
        project_name: options.project_name().to_string(),
        groups,
    };

    render(ArtifactKind::EnvTemplate, ENV_TEMPLATE, &context)
}

fn line(var: &EnvVar) -> TemplateLine {
    TemplateLine {
        name: var.name,
        value: var.template_value().to_string(),
        comment: var.comment,
        required: var.required,
    }
}
