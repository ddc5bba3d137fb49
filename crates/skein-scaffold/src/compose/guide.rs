//! README.md, the generated project's setup guide
//!
//! Steps are numbered from their position in the list, so optional steps never
//! leave gaps: install/configure is always 1 and "start" is always last.

use super::{render, Artifact, ArtifactKind};
use crate::compose::docker::{APP_SERVICE, POSTGRES_SERVICE, REDIS_SERVICE};
use crate::error::Result;
use crate::fragments::{select_display, Display};
use crate::options::ProjectOptions;
use crate::product::Framework;
use serde::Serialize;

const GUIDE_TEMPLATE: &str = r#"# {{project_name}}

A {{display_name}} application generated by `{{generator}}`.

## Stack

- **Database:** {{display.database}}
- **Storage:** {{display.storage}}
- **Queue:** {{display.queue}}

## Getting started
{{#each steps}}

### {{number}}. {{title}}

```bash
{{#each commands}}
{{this}}
{{/each}}
```
{{#if note}}

{{note}}
{{/if}}
{{/each}}

## Scripts

| Command | Description |
|---|---|
| `npm run dev` | Run with file watching |
| `npm run build` | Compile TypeScript to `dist/` |
| `npm start` | Run the compiled build |
| `npx {{project_name}} test` | Run every collector once via the `{{cli_tool}}` CLI |
{{#if services}}

## Docker

```bash
docker compose up --build
```

Services: {{services}}.
{{/if}}
{{#if examples}}

## Example collector

`src/collectors/post-feed.ts` fetches a user and their posts in parallel, merges them into one timestamped record, and reports how many posts it collected. It is registered with the engine in `src/index.ts`.
{{/if}}

## Project structure

```
{{#each files}}
{{this}}
{{/each}}
```

## Learn more

{{docs_url}}
"#;

/// One numbered setup step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideStep {
    pub title: String,
    pub commands: Vec<String>,
    pub note: Option<String>,
}

impl GuideStep {
    fn new(title: impl Into<String>, commands: &[&str]) -> Self {
        Self {
            title: title.into(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
            note: None,
        }
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Ordered setup steps; the step number is the index plus one
pub fn guide_steps(options: &ProjectOptions) -> Vec<GuideStep> {
    let mut steps = vec![GuideStep::new(
        "Install dependencies and configure the environment",
        &["npm install", "cp .env.example .env"],
    )];

    if options.is_postgres() {
        let step = if options.include_docker() {
            GuideStep::new(
                "Set up PostgreSQL",
                &[format!("docker compose up -d {}", POSTGRES_SERVICE).as_str()],
            )
            .with_note("Set DB_USER, DB_PASSWORD and DB_NAME in .env first; the container reads them on first start.")
        } else {
            GuideStep::new(
                "Set up PostgreSQL",
                &[format!("createdb {}", options.project_name()).as_str()],
            )
            .with_note(format!(
                "Set DB_HOST, DB_USER, DB_PASSWORD and DB_NAME={} in .env.",
                options.project_name()
            ))
        };
        steps.push(step);
    }

    if options.use_redis() {
        let step = if options.include_docker() {
            GuideStep::new(
                "Start Redis",
                &[format!("docker compose up -d {}", REDIS_SERVICE).as_str()],
            )
        } else {
            GuideStep::new(
                "Start Redis",
                &[format!(
                    "docker run -d --name {}-redis -p 6379:6379 redis:7-alpine",
                    options.project_name()
                )
                .as_str()],
            )
            .with_note("Adjust REDIS_HOST and REDIS_PORT in .env if Redis runs elsewhere.")
        };
        steps.push(step);
    }

    steps.push(GuideStep::new("Start the development server", &["npm run dev"]));
    steps
}

#[derive(Serialize)]
struct NumberedStep {
    number: usize,
    #[serde(flatten)]
    step: GuideStep,
}

#[derive(Serialize)]
struct GuideContext {
    project_name: String,
    display_name: String,
    generator: String,
    cli_tool: String,
    docs_url: String,
    display: Display,
    steps: Vec<NumberedStep>,
    /// Compose services, empty without Docker
    services: String,
    examples: bool,
    files: Vec<&'static str>,
}

/// Compose the guide from the display strings and every gate
pub fn compose_guide(options: &ProjectOptions, framework: &Framework) -> Result<Artifact> {
    let steps = guide_steps(options)
        .into_iter()
        .enumerate()
        .map(|(i, step)| NumberedStep { number: i + 1, step })
        .collect();

    let services = if options.include_docker() {
        let mut services = vec![APP_SERVICE];
        if options.is_postgres() {
            services.push(POSTGRES_SERVICE);
        }
        if options.use_redis() {
            services.push(REDIS_SERVICE);
        }
        services
            .iter()
            .map(|s| format!("`{}`", s))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        String::new()
    };

    let mut files = vec![
        ".env.example",
        ".gitignore",
        "bin/cli.js",
        "package.json",
        "src/index.ts",
        "tsconfig.json",
    ];
    if options.include_examples() {
        files.extend(["src/collectors/index.ts", "src/collectors/post-feed.ts"]);
    }
    if options.include_docker() {
        files.extend(["Dockerfile", "docker-compose.yml"]);
    }
    files.sort_unstable();

    let context = GuideContext {
        project_name: options.project_name().to_string(),
        display_name: framework.display_name.clone(),
        generator: framework.generator.clone(),
        cli_tool: framework.cli_tool.clone(),
        docs_url: framework.docs_url.clone(),
        display: select_display(options),
        steps,
        services,
        examples: options.include_examples(),
        files,
    };

    render(ArtifactKind::Guide, GUIDE_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Database;
    use crate::product::testing::framework;

    fn options(database: Database, redis: bool, docker: bool) -> ProjectOptions {
        ProjectOptions::builder("demo", "demo")
            .database(database)
            .use_redis(redis)
            .include_docker(docker)
            .build()
            .unwrap()
    }

    /// Numbers from `### N.` headings, in order
    fn step_numbers(readme: &str) -> Vec<usize> {
        readme
            .lines()
            .filter_map(|l| l.strip_prefix("### "))
            .filter_map(|l| l.split_once('.'))
            .filter_map(|(n, _)| n.parse().ok())
            .collect()
    }

    #[test]
    fn test_step_numbering_is_contiguous() {
        for database in Database::ALL {
            for redis in [false, true] {
                for docker in [false, true] {
                    let opts = options(database, redis, docker);
                    let readme = compose_guide(&opts, &framework()).unwrap().contents;
                    let numbers = step_numbers(&readme);

                    let optional = usize::from(database == Database::Postgresql) + usize::from(redis);
                    let expected: Vec<usize> = (1..=2 + optional).collect();
                    assert_eq!(numbers, expected, "{database}/redis={redis}/docker={docker}");

                    let last = format!("### {}. Start the development server", 2 + optional);
                    assert!(readme.contains(&last));
                }
            }
        }
    }

    #[test]
    fn test_no_optional_steps_falls_back_to_two() {
        let steps = guide_steps(&options(Database::Sqlite, false, false));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].commands, vec!["npm install", "cp .env.example .env"]);
        assert_eq!(steps[1].commands, vec!["npm run dev"]);
    }

    #[test]
    fn test_redis_step_uses_project_name() {
        let steps = guide_steps(&options(Database::Postgresql, true, false));
        assert_eq!(steps[1].commands, vec!["createdb demo"]);
        assert_eq!(
            steps[2].commands,
            vec!["docker run -d --name demo-redis -p 6379:6379 redis:7-alpine"]
        );
    }

    #[test]
    fn test_docker_steps_use_compose_services() {
        let steps = guide_steps(&options(Database::Postgresql, true, true));
        assert_eq!(steps[1].commands, vec!["docker compose up -d postgres"]);
        assert_eq!(steps[2].commands, vec!["docker compose up -d redis"]);
    }

    #[test]
    fn test_guide_sections_follow_gates() {
        let plain = compose_guide(&options(Database::Sqlite, false, false), &framework())
            .unwrap()
            .contents;
        assert!(plain.contains("- **Database:** SQLite"));
        assert!(!plain.contains("## Docker"));
        assert!(!plain.contains("## Example collector"));

        let opts = ProjectOptions::builder("demo", "demo")
            .include_docker(true)
            .include_examples(true)
            .build()
            .unwrap();
        let full = compose_guide(&opts, &framework()).unwrap().contents;
        assert!(full.contains("## Docker"));
        assert!(full.contains("Services: `app`."));
        assert!(full.contains("## Example collector"));
        assert!(full.contains("src/collectors/post-feed.ts\n"));
    }

    #[test]
    fn test_step_layout() {
        let readme = compose_guide(&options(Database::Postgresql, false, false), &framework())
            .unwrap()
            .contents;
        assert!(readme.contains(
            "### 2. Set up PostgreSQL\n\n```bash\ncreatedb demo\n```\n\nSet DB_HOST, DB_USER, DB_PASSWORD and DB_NAME=demo in .env.\n"
        ));
        assert!(readme.contains("### 3. Start the development server\n\n```bash\nnpm run dev\n```\n\n## Scripts"));
        assert!(readme.ends_with("## Learn more\n\nhttps://skein.dev/docs\n"));
        assert!(!readme.contains("{{"));
    }
}
