mod support;

use std::rc::Rc;

use soundstudio_common::config::NotificationConfig;
use soundstudio_common::{ManualScheduler, Notifier, Severity};
use support::{tracing_init, PageBanners};

fn setup() -> (Notifier<PageBanners>, Rc<ManualScheduler>) {
    tracing_init();
    let scheduler = Rc::new(ManualScheduler::new());
    let notifier = Notifier::new(
        PageBanners::default(),
        scheduler.clone(),
        NotificationConfig::default(),
    );
    (notifier, scheduler)
}

#[test]
fn error_banner_disappears_after_five_seconds() {
    let (notifier, scheduler) = setup();
    notifier.show_error("Analysis failed").unwrap();

    scheduler.advance_ms(4999);
    assert_eq!(notifier.host().messages(), vec!["Analysis failed"]);

    scheduler.advance_ms(1);
    assert!(notifier.host().messages().is_empty());
}

#[test]
fn success_banner_disappears_after_three_seconds() {
    let (notifier, scheduler) = setup();
    notifier.show_success("Upload complete").unwrap();

    scheduler.advance_ms(2999);
    assert_eq!(notifier.host().messages().len(), 1);
    scheduler.advance_ms(1);
    assert!(notifier.host().messages().is_empty());
}

#[test]
fn mixed_banners_expire_independently() {
    let (notifier, scheduler) = setup();
    notifier.show_error("bad file").unwrap();
    scheduler.advance_ms(1000);
    notifier.show_success("saved").unwrap();

    assert_eq!(notifier.host().messages(), vec!["saved", "bad file"]);

    // success expires at t=4000, error at t=5000
    scheduler.advance_ms(3000);
    assert_eq!(notifier.host().messages(), vec!["bad file"]);
    scheduler.advance_ms(1000);
    assert!(notifier.host().messages().is_empty());
}

#[test]
fn user_close_before_timeout_is_harmless() {
    let (notifier, scheduler) = setup();
    let ticket = notifier.show_error("closable").unwrap();
    notifier.show_success("other").unwrap();

    notifier.host().user_close(ticket.element);
    assert_eq!(notifier.host().messages(), vec!["other"]);

    scheduler.advance_ms(5000);
    assert!(notifier.host().messages().is_empty());
}

#[test]
fn cancel_auto_dismiss_keeps_banner() {
    let (notifier, scheduler) = setup();
    let ticket = notifier.show_success("pinned").unwrap();
    assert_eq!(ticket.severity, Severity::Success);

    assert!(notifier.cancel_auto_dismiss(&ticket));
    scheduler.advance_ms(60_000);
    assert_eq!(notifier.host().messages(), vec!["pinned"]);

    notifier.dismiss(&ticket);
    assert!(notifier.host().messages().is_empty());
}

#[test]
fn cancel_after_expiry_reports_false() {
    let (notifier, scheduler) = setup();
    let ticket = notifier.show_success("gone").unwrap();
    scheduler.advance_ms(3000);
    assert!(!notifier.cancel_auto_dismiss(&ticket));
}

#[test]
fn configured_timeouts_are_honoured() {
    tracing_init();
    let scheduler = Rc::new(ManualScheduler::new());
    let notifier = Notifier::new(
        PageBanners::default(),
        scheduler.clone(),
        NotificationConfig {
            error_timeout_ms: 100,
            ..NotificationConfig::default()
        },
    );
    notifier.show_error("quick").unwrap();
    scheduler.advance_ms(100);
    assert!(notifier.host().messages().is_empty());
}
