//! Transient error/success banners
//!
//! A [`Notifier`] inserts banners through a [`BannerHost`] and schedules
//! their removal. The timeout depends on severity (errors linger longer).

use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::scheduler::{Scheduler, TaskId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Banner container '{selector}' not found")]
    ContainerMissing { selector: String },
    #[error("Failed to build banner: {0}")]
    Dom(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

/// A banner ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
    /// CSS class list for the banner element
    pub class: String,
}

/// Where banners live. `Element` is whatever handle the host needs to remove
/// a banner again (a DOM node, an index, ...).
pub trait BannerHost {
    type Element: Clone + 'static;

    /// Insert `banner` ahead of existing page content.
    fn insert(&self, banner: &Banner) -> Result<Self::Element, NotifyError>;

    /// Remove a banner. Must tolerate banners the user already closed.
    fn remove(&self, element: &Self::Element);
}

/// Handle to a shown banner
#[derive(Debug, Clone)]
pub struct BannerTicket<E> {
    pub element: E,
    pub severity: Severity,
    task: TaskId,
}

pub struct Notifier<H: BannerHost> {
    host: Rc<H>,
    scheduler: Rc<dyn Scheduler>,
    config: NotificationConfig,
}

impl<H: BannerHost + 'static> Notifier<H> {
    pub fn new(host: H, scheduler: Rc<dyn Scheduler>, config: NotificationConfig) -> Self {
        Self {
            host: Rc::new(host),
            scheduler,
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn show_error(&self, message: &str) -> Result<BannerTicket<H::Element>, NotifyError> {
        self.show(message, Severity::Error)
    }

    pub fn show_success(&self, message: &str) -> Result<BannerTicket<H::Element>, NotifyError> {
        self.show(message, Severity::Success)
    }

    pub fn show(
        &self,
        message: &str,
        severity: Severity,
    ) -> Result<BannerTicket<H::Element>, NotifyError> {
        let banner = Banner {
            message: message.to_string(),
            severity,
            class: self.class_for(severity).to_string(),
        };
        let element = self.host.insert(&banner)?;

        let timeout = self.timeout_for(severity);
        let host = self.host.clone();
        let scheduled = element.clone();
        let task = self.scheduler.schedule(
            timeout,
            Box::new(move || host.remove(&scheduled)),
        );
        debug!("Showing {:?} banner for {:?}", severity, timeout);

        Ok(BannerTicket {
            element,
            severity,
            task,
        })
    }

    /// Remove a banner now and drop its pending auto-removal.
    pub fn dismiss(&self, ticket: &BannerTicket<H::Element>) {
        self.scheduler.cancel(ticket.task);
        self.host.remove(&ticket.element);
    }

    /// Keep the banner on screen until dismissed. Returns false if the
    /// auto-removal already happened.
    pub fn cancel_auto_dismiss(&self, ticket: &BannerTicket<H::Element>) -> bool {
        let cancelled = self.scheduler.cancel(ticket.task);
        if !cancelled {
            warn!("Banner auto-dismiss already ran or was cancelled");
        }
        cancelled
    }

    pub fn timeout_for(&self, severity: Severity) -> Duration {
        let ms = match severity {
            Severity::Error => self.config.error_timeout_ms,
            Severity::Success => self.config.success_timeout_ms,
        };
        Duration::from_millis(ms)
    }

    fn class_for(&self, severity: Severity) -> &str {
        match severity {
            Severity::Error => &self.config.error_class,
            Severity::Success => &self.config.success_class,
        }
    }
}
