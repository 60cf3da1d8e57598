//! End-to-end walkthrough of the vote throttle and the XP award path,
//! wired up with in-process fakes.
//!
//! Run with: cargo run --example basic

use builder_engage::{
    IdentityProvider, MemoryStore, NoticeKind, Notifier, ProfileStore, RateLimitConfig,
    RateLimiter, XpAction, XpAwarder,
};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

struct Session;

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<String> {
        Some("u1".to_string())
    }
}

struct Points(Mutex<i64>);

#[async_trait::async_trait]
impl ProfileStore for Points {
    async fn point_total(&self, _user: &str) -> Result<i64, String> {
        Ok(*self.0.lock().unwrap())
    }

    async fn add_points(&self, _user: &str, amount: i64) -> Result<(), String> {
        *self.0.lock().unwrap() += amount;
        Ok(())
    }
}

struct Toasts;

impl Notifier for Toasts {
    fn notify(&self, message: &str, kind: NoticeKind) {
        println!("  toast [{kind:?}] {message}");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A tight window so the demo shows a denial and a rollover
    let config = RateLimitConfig::new("vote", 3, Duration::from_secs(2)).expect("valid config");
    let mut limiter = RateLimiter::new(config, Session, MemoryStore::new());

    println!("four rapid votes against a 3-per-2s window:");
    for i in 1..=4 {
        let now = SystemTime::now();
        let allowed = limiter.check("project:42", now);
        println!(
            "  vote {i}: allowed={allowed} remaining={}",
            limiter.status().remaining
        );
        if !allowed {
            println!("  try again in {:?}", limiter.remaining_time(now));
        }
    }

    println!("waiting for the window to roll over...");
    tokio::time::sleep(Duration::from_millis(2100)).await;
    let allowed = limiter.check("project:42", SystemTime::now());
    println!(
        "  vote after rollover: allowed={allowed} remaining={}",
        limiter.status().remaining
    );

    println!("awarding XP to a user sitting at 95 points:");
    let awarder = XpAwarder::new(Session, Points(Mutex::new(95)), Toasts);
    awarder.award(XpAction::Vote, 1).await;
    awarder.award(XpAction::ProjectSubmit, 1).await;
}
