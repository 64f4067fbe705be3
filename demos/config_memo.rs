//! Memoizes an expensive "context resolution" step, invalidating everything
//! at once when the underlying config file changes.

use std::sync::Arc;

use groupcache::options::GroupCacheOptions;
use groupcache::policy::group_lru::BoundedGroupCache;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Context {
    locale: String,
    revision: u64,
}

fn resolve(locale: &str, revision: u64) -> Arc<Context> {
    tracing::info!(locale, revision, "resolving context");
    Arc::new(Context {
        locale: locale.to_string(),
        revision,
    })
}

fn lookup(
    cache: &mut BoundedGroupCache<String, Arc<Context>>,
    locale: &str,
    revision: u64,
) -> Arc<Context> {
    let key = locale.to_string();
    if let Some(ctx) = cache.get(&key, &revision) {
        return Arc::clone(ctx);
    }
    let ctx = resolve(locale, revision);
    cache.set(key, Arc::clone(&ctx), revision);
    ctx
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // A malformed capacity is logged and replaced by the default.
    let options: GroupCacheOptions =
        serde_json::from_str(r#"{ "max": "lots" }"#).unwrap_or_default();
    let mut cache = BoundedGroupCache::from_options(&options);

    let mut revision = 1;
    for locale in ["en-US", "fr-FR", "en-US", "fr-FR"] {
        let ctx = lookup(&mut cache, locale, revision);
        println!("{} @ rev {}", ctx.locale, ctx.revision);
    }

    // Config file changed on disk: bump the group id instead of clearing.
    revision += 1;
    let ctx = lookup(&mut cache, "en-US", revision);
    println!("{} @ rev {} (entries: {})", ctx.locale, ctx.revision, cache.len());
}
