//! Integration tests for dependency-injected pipelines with decorators.
#![cfg(feature = "async")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nomad::decorators::{DecoratorExt, Level, Timed};
use nomad::{AsyncNomad, Either, NomadEither, TaskNomadEither};

#[derive(Debug, Clone, PartialEq)]
enum Effect {
    Fetched(&'static str),
    Timed(Timed),
}

impl From<Timed> for Effect {
    fn from(t: Timed) -> Self {
        Effect::Timed(t)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Errors {
    NotFound(String),
    Upstream { attempts: usize },
}

struct HttpClient {
    calls: AtomicUsize,
}

impl HttpClient {
    async fn get(&self, url: &str) -> Result<usize, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if url.starts_with("missing") {
            Err(url.to_string())
        } else {
            Ok(url.len())
        }
    }
}

#[derive(Clone)]
struct Deps {
    http: Arc<HttpClient>,
}

fn deps() -> Deps {
    Deps {
        http: Arc::new(HttpClient {
            calls: AtomicUsize::new(0),
        }),
    }
}

fn fetch(url: &'static str) -> AsyncNomad<Deps, Effect, Errors, usize> {
    AsyncNomad::try_catch(
        move |d: Deps| async move { d.http.get(url).await },
        Errors::NotFound,
    )
    .effect(Effect::Fetched(url))
}

fn timings(result: &NomadEither<Effect, Errors, usize>) -> Vec<&Timed> {
    result
        .effects()
        .iter()
        .filter_map(|e| match e {
            Effect::Timed(t) => Some(t),
            Effect::Fetched(_) => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_timed_pipeline_records_each_stage() {
    let pipeline = fetch("example.com")
        .timed("first")
        .chain(|n| fetch("rust-lang.org").map(move |m| n + m).timed("second"));

    let d = deps();
    let result = pipeline.execute(d.clone()).await;

    assert_eq!(result.value(), &Either::right(24));
    let times = timings(&result);
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].operation_name, "first");
    assert_eq!(times[1].operation_name, "second");
    assert!(times.iter().all(|t| t.level == Level::Info));
    assert!(times.iter().all(|t| t.time_ms >= 20.0));
    assert_ne!(times[0].span_id, times[1].span_id);
    assert_eq!(d.http.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_ap_runs_both_requests_concurrently() {
    let combined = fetch("a.io")
        .map(|a| move |b: usize| a + b)
        .ap(fetch("bb.io"))
        .timed("both");

    let result = combined.execute(deps()).await;
    assert_eq!(result.value(), &Either::right(9));
    let both = timings(&result)[0];
    assert!(both.time_ms >= 20.0 && both.time_ms < 40.0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_short_circuits_and_is_still_timed() {
    let d = deps();
    let pipeline = fetch("missing.page")
        .chain(|_| fetch("never.called"))
        .timed("guarded");

    let result = pipeline.execute(d.clone()).await;
    assert_eq!(
        result.value(),
        &Either::left(Errors::NotFound("missing.page".to_string()))
    );
    assert_eq!(result.effects()[0], Effect::Fetched("missing.page"));
    assert_eq!(timings(&result).len(), 1);
    assert_eq!(d.http.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_with_alt_and_delay() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let flaky = AsyncNomad::<Deps, Effect, Errors, usize>::new(move |_| {
        let counter = Arc::clone(&counter);
        TaskNomadEither::from_task_either(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 2 {
                    Either::left(Errors::Upstream { attempts: n })
                } else {
                    Either::right(n)
                }
            }
        })
    });

    let retried = flaky
        .clone()
        .delay(Duration::from_millis(50))
        .alt(move || flaky.clone())
        .timed("retried");

    let result = retried.execute(deps()).await;
    assert_eq!(result.value(), &Either::right(2));
    assert!(timings(&result)[0].time_ms >= 50.0);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_validation_collects_all_missing_pages() {
    let both = fetch("missing-a")
        .map_left(|e| vec![e])
        .map(|a| move |b: usize| a + b)
        .ap_validation(fetch("missing-b").map_left(|e| vec![e]));

    let result = both.evaluate(deps()).await;
    assert_eq!(
        result,
        Either::left(vec![
            Errors::NotFound("missing-a".to_string()),
            Errors::NotFound("missing-b".to_string()),
        ])
    );
}
