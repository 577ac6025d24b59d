//! Pipeline Example
//!
//! Demonstrates an order pipeline that reads its dependencies from an
//! injected environment, records domain events as effects, and is timed with
//! the `async` decorators.
//!
//! Run with: cargo run --example pipeline --features async
//! Add `--features async,tracing` to see the timing events as they happen.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nomad::decorators::{DecoratorExt, Timed};
use nomad::{AsyncNomad, Either, TaskNomadEither};

#[derive(Debug, Clone)]
enum Event {
    PriceLooked { sku: String, cents: u32 },
    DiscountApplied(u32),
    Timed(Timed),
}

impl From<Timed> for Event {
    fn from(t: Timed) -> Self {
        Event::Timed(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum OrderError {
    UnknownSku(String),
}

struct Catalog {
    prices: HashMap<String, u32>,
}

impl Catalog {
    async fn price(&self, sku: &str) -> Result<u32, OrderError> {
        tokio::time::sleep(Duration::from_millis(15)).await;
        self.prices
            .get(sku)
            .copied()
            .ok_or_else(|| OrderError::UnknownSku(sku.to_string()))
    }
}

#[derive(Clone)]
struct Env {
    catalog: Arc<Catalog>,
    discount_percent: u32,
}

type Step<T> = AsyncNomad<Env, Event, OrderError, T>;

// ============================================================================
// Steps
// ============================================================================

fn price_of(sku: &'static str) -> Step<u32> {
    AsyncNomad::try_catch(
        move |env: Env| async move { env.catalog.price(sku).await },
        |e: OrderError| e,
    )
    .effect_on_right(move |cents| Event::PriceLooked {
        sku: sku.to_string(),
        cents: *cents,
    })
}

fn apply_discount(total: u32) -> Step<u32> {
    AsyncNomad::new(move |env: Env| {
        let off = total * env.discount_percent / 100;
        TaskNomadEither::right(total - off).effect(Event::DiscountApplied(off))
    })
}

fn order(skus: [&'static str; 2]) -> Step<u32> {
    price_of(skus[0])
        .map(|a| move |b: u32| a + b)
        .ap(price_of(skus[1]))
        .timed("lookup")
        .chain(apply_discount)
}

#[tokio::main]
async fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Pipeline Example ===\n");

    let env = Env {
        catalog: Arc::new(Catalog {
            prices: HashMap::from([("apple".to_string(), 300), ("pear".to_string(), 450)]),
        }),
        discount_percent: 10,
    };

    for skus in [["apple", "pear"], ["apple", "durian"]] {
        let (events, outcome) = order(skus).execute(env.clone()).await.into_parts();
        println!("order {:?}", skus);
        for event in events {
            match event {
                Event::PriceLooked { sku, cents } => println!("  {} costs {} cents", sku, cents),
                Event::DiscountApplied(off) => println!("  discount of {} cents", off),
                Event::Timed(t) => println!("  {} took {:.1}ms", t.operation_name, t.time_ms),
            }
        }
        match outcome {
            Either::Right(cents) => println!("  total: {} cents\n", cents),
            Either::Left(OrderError::UnknownSku(sku)) => println!("  failed: unknown sku {}\n", sku),
        }
    }
}
