use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tokio::sync::Notify;

use ducks::logging::init_tracing;
use ducks::{create_module, Action, Duck, DynamicStore, Module, Reducer, StoreConfig, Task, View};

#[derive(Debug, Parser)]
#[command(name = "ducks-demo", about = "Mount a counter module on a dynamic store")]
struct Args {
    /// Store config file (defaults to ~/.config/ducks/store.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of delayed increments to request.
    #[arg(long, default_value_t = 3)]
    increments: u64,

    /// Milliseconds the counter task waits before each increment.
    #[arg(long, default_value_t = 10)]
    delay_ms: u64,
}

struct CounterView;

impl View for CounterView {
    type Props = Value;
    type Output = String;

    fn render(&self, props: &Value) -> String {
        format!("count: {}", props)
    }
}

fn counter_module(delay: Duration) -> Module<CounterView> {
    let duck = Duck::new()
        .action("increment", |_| Action::new("INCREMENT"))
        .action("increment_later", |_| Action::new("INCREMENT_LATER"))
        .selector("count", |slice| slice.get("count").cloned().unwrap_or(json!(0)))
        .constant("INCREMENT", "INCREMENT")
        .constant("INCREMENT_LATER", "INCREMENT_LATER");

    let reducer = Reducer::new(|state, action| {
        let count = state
            .and_then(|state| state.get("count"))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        match action.kind.as_str() {
            "INCREMENT" => json!({ "count": count + 1 }),
            _ => json!({ "count": count }),
        }
    });

    let module = create_module("counter", duck, CounterView).with_reducer(reducer);
    let later = module
        .types()
        .get("INCREMENT_LATER")
        .unwrap_or_default()
        .to_string();
    let actions = module.actions();

    module.with_saga(Task::new(move |mut ctx| {
        let later = later.clone();
        let actions = actions.clone();
        async move {
            while ctx.take(&later).await.is_some() {
                tokio::time::sleep(delay).await;
                let Some(increment) = actions.create("increment", Value::Null) else {
                    break;
                };
                if let Err(err) = ctx.put(increment) {
                    tracing::warn!(path = %ctx.path(), error = %err, "Counter task stopping");
                    break;
                }
            }
        }
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StoreConfig::load_from(path)?,
        None => StoreConfig::load()?,
    };
    let store = DynamicStore::with_config(config, BTreeMap::new(), Vec::new());

    let module = counter_module(Duration::from_millis(args.delay_ms));
    let actions = module.actions();
    let selectors = module.selectors();

    let view = module.container().mount(&store)?;
    // A second mount leaves the running task alone.
    module.container().mount(&store)?;

    let later = actions
        .create("increment_later", Value::Null)
        .context("counter module has no increment_later action")?;
    for _ in 0..args.increments {
        store.dispatch(later.clone())?;
    }

    let changed = Arc::new(Notify::new());
    let listener = Arc::clone(&changed);
    let subscription = store.subscribe(move || listener.notify_one());

    let deadline = Duration::from_millis(
        args.delay_ms
            .saturating_mul(args.increments)
            .saturating_add(1000),
    );
    let count = |store: &DynamicStore| {
        selectors
            .select("count", &store.state())
            .and_then(|count| count.as_u64())
            .unwrap_or(0)
    };
    tokio::time::timeout(deadline, async {
        while count(&store) < args.increments {
            changed.notified().await;
        }
    })
    .await
    .context("timed out waiting for the counter task")?;
    store.unsubscribe(subscription);

    println!("{}", view.render(&json!(count(&store))));
    Ok(())
}
