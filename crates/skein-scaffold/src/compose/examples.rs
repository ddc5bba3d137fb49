//! Example collector sources under src/collectors/

use super::{render, Artifact, ArtifactKind};
use crate::error::Result;
use crate::fragments::imports::EXAMPLE_COLLECTOR_CLASS;
use crate::product::Framework;
use serde_json::json;

const COLLECTOR_TEMPLATE: &str = r#"import type { Collector } from '{{package}}';

interface User {
  id: number;
  name: string;
  email: string;
}

interface Post {
  id: number;
  userId: number;
  title: string;
  body: string;
}

export interface PostFeedRecord {
  collectedAt: string;
  user: User;
  posts: Post[];
}

const API_BASE = 'https://jsonplaceholder.typicode.com';

async function fetchJson<T>(url: string): Promise<T> {
  const response = await fetch(url);
  if (!response.ok) {
    throw new Error(`GET ${url} failed with HTTP ${response.status}`);
  }
  return (await response.json()) as T;
}

/**
 * Fetches a user and their posts in parallel and merges them into one
 * timestamped record.
 */
export class {{collector_class}} implements Collector<PostFeedRecord> {
  readonly name = 'post-feed';

  constructor(private readonly userId = 1) {}

  async collect(): Promise<PostFeedRecord> {
    const [user, posts] = await Promise.all([
      fetchJson<User>(`${API_BASE}/users/${this.userId}`),
      fetchJson<Post[]>(`${API_BASE}/posts?userId=${this.userId}`),
    ]);

    return {
      collectedAt: new Date().toISOString(),
      user,
      posts,
    };
  }

  summarize(record: PostFeedRecord): string {
    return `Collected ${record.posts.length} posts for ${record.user.name}`;
  }
}
"#;

const INDEX_TEMPLATE: &str = "\
export { {{collector_class}} } from './post-feed.js';
export type { PostFeedRecord } from './post-feed.js';
";

/// The example data collector
pub fn compose_example_collector(framework: &Framework) -> Result<Artifact> {
    let context = json!({
        "package": framework.package,
        "collector_class": EXAMPLE_COLLECTOR_CLASS,
    });
    render(ArtifactKind::ExampleCollector, COLLECTOR_TEMPLATE, &context)
}

/// Re-exports for the entry point
pub fn compose_example_index() -> Result<Artifact> {
    let context = json!({ "collector_class": EXAMPLE_COLLECTOR_CLASS });
    render(ArtifactKind::ExampleIndex, INDEX_TEMPLATE, &context)
}
