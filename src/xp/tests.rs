use super::{NoticeKind, Notifier, ProfileStore, XpAction, XpAwarder};
use crate::identity::IdentityProvider;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

struct User(&'static str);

impl IdentityProvider for User {
    fn current_user(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_user(&self) -> Option<String> {
        None
    }
}

struct FakeProfiles {
    total: Arc<Mutex<i64>>,
    fail: Arc<AtomicBool>,
}

impl FakeProfiles {
    fn with_total(total: i64) -> (Self, Arc<Mutex<i64>>, Arc<AtomicBool>) {
        let total = Arc::new(Mutex::new(total));
        let fail = Arc::new(AtomicBool::new(false));
        let profiles = FakeProfiles {
            total: total.clone(),
            fail: fail.clone(),
        };
        (profiles, total, fail)
    }
}

#[async_trait]
impl ProfileStore for FakeProfiles {
    async fn point_total(&self, _user: &str) -> Result<i64, String> {
        if self.fail.load(Ordering::Relaxed) {
            return Err("profile backend down".to_string());
        }
        Ok(*self.total.lock().unwrap())
    }

    async fn add_points(&self, _user: &str, amount: i64) -> Result<(), String> {
        if self.fail.load(Ordering::Relaxed) {
            return Err("profile backend down".to_string());
        }
        *self.total.lock().unwrap() += amount;
        Ok(())
    }
}

struct Recorder(Arc<Mutex<Vec<(String, NoticeKind)>>>);

impl Recorder {
    fn new() -> (Self, Arc<Mutex<Vec<(String, NoticeKind)>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Recorder(log.clone()), log)
    }
}

impl Notifier for Recorder {
    fn notify(&self, message: &str, kind: NoticeKind) {
        self.0.lock().unwrap().push((message.to_string(), kind));
    }
}

#[tokio::test]
async fn award_adds_points_and_notifies() {
    let (profiles, total, _) = FakeProfiles::with_total(95);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    awarder.award(XpAction::Vote, 1).await;

    assert_eq!(*total.lock().unwrap(), 97);
    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![("+2 XP - Voted on a project".to_string(), NoticeKind::Success)]
    );
}

#[tokio::test]
async fn crossing_a_band_announces_the_level_up() {
    let (profiles, total, _) = FakeProfiles::with_total(90);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    awarder.award(XpAction::ProjectSubmit, 1).await;

    assert_eq!(*total.lock().unwrap(), 140);
    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].0, "+50 XP - Submitted a project");
    assert_eq!(log[1].0, "Level up! You reached level 1");
}

#[tokio::test]
async fn staying_inside_the_band_stays_quiet_about_levels() {
    let (profiles, total, _) = FakeProfiles::with_total(95);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    // 95 + 2 = 97, still level 0
    awarder.award(XpAction::Vote, 1).await;

    assert_eq!(*total.lock().unwrap(), 97);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn multiplier_scales_the_award() {
    let (profiles, total, _) = FakeProfiles::with_total(0);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    awarder.award(XpAction::Vote, 3).await;

    assert_eq!(*total.lock().unwrap(), 6);
    assert_eq!(log.lock().unwrap()[0].0, "+6 XP - Voted on a project");
}

#[tokio::test]
async fn anonymous_award_is_a_no_op() {
    let (profiles, total, _) = FakeProfiles::with_total(95);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(Anonymous, profiles, notifier);

    awarder.award(XpAction::ProjectSubmit, 1).await;

    assert_eq!(*total.lock().unwrap(), 95);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn profile_failure_suppresses_notifications() {
    let (profiles, total, fail) = FakeProfiles::with_total(95);
    fail.store(true, Ordering::Relaxed);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    awarder.award(XpAction::Vote, 1).await;

    assert_eq!(*total.lock().unwrap(), 95);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failed_award_releases_the_guard() {
    let (profiles, total, fail) = FakeProfiles::with_total(95);
    fail.store(true, Ordering::Relaxed);
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    awarder.award(XpAction::Vote, 1).await;
    assert!(log.lock().unwrap().is_empty());

    // The backend recovers and the next award goes through
    fail.store(false, Ordering::Relaxed);
    awarder.award(XpAction::Vote, 1).await;

    assert_eq!(*total.lock().unwrap(), 97);
    assert_eq!(log.lock().unwrap().len(), 1);
}

struct SlowProfiles {
    total: Arc<Mutex<i64>>,
    started: Arc<tokio::sync::Notify>,
    gate: Arc<tokio::sync::Notify>,
}

#[async_trait]
impl ProfileStore for SlowProfiles {
    async fn point_total(&self, _user: &str) -> Result<i64, String> {
        self.started.notify_one();
        self.gate.notified().await;
        Ok(*self.total.lock().unwrap())
    }

    async fn add_points(&self, _user: &str, amount: i64) -> Result<(), String> {
        *self.total.lock().unwrap() += amount;
        Ok(())
    }
}

#[tokio::test]
async fn overlapping_award_is_dropped_not_queued() {
    let total = Arc::new(Mutex::new(0));
    let started = Arc::new(tokio::sync::Notify::new());
    let gate = Arc::new(tokio::sync::Notify::new());
    let profiles = SlowProfiles {
        total: total.clone(),
        started: started.clone(),
        gate: gate.clone(),
    };
    let (notifier, log) = Recorder::new();
    let awarder = XpAwarder::new(User("u1"), profiles, notifier);

    tokio::join!(awarder.award(XpAction::Vote, 1), async {
        // Wait until the first award is inside the profile call, then
        // issue a second one; it must be dropped, not queued.
        started.notified().await;
        awarder.award(XpAction::Vote, 1).await;
        gate.notify_one();
    });

    assert_eq!(*total.lock().unwrap(), 2);
    assert_eq!(log.lock().unwrap().len(), 1);
}
