//! Session identity resolution.
//!
//! Runs once per session at startup. The Telegram host injects its user
//! object via script, which can land after first render, so resolution
//! polls on a fixed interval with a bounded attempt budget instead of
//! assuming the identity is there on mount. Outcomes:
//!
//! - user object present (immediately or late) -> resolved as that user
//! - budget exhausted outside the Telegram host -> deterministic guest
//!   fallback, produced exactly once
//! - budget exhausted inside the host but with no user object -> anonymous,
//!   no substitute identity
//!
//! Once an identity exists, exactly one employee lookup is issued; a
//! missing record is the normal customer outcome. The poll is cancellable
//! (view unmount) and no timer survives resolution or cancellation.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use petal_core::{EmployeeIdentity, TelegramUser};

use crate::client::EmployeeDirectory;

/// Interval between attempts to read the platform user object.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum number of read attempts before giving up on the platform.
pub const MAX_POLL_ATTEMPTS: u32 = 20;

// =============================================================================
// Platform abstraction
// =============================================================================

/// Host environment surface the resolver reads the platform identity from.
pub trait PlatformContext {
    /// Whether Telegram init data is present, i.e. the page is embedded in
    /// the Telegram host at all.
    fn init_data_present(&self) -> bool;

    /// The platform user object, once the host script has injected it.
    fn current_user(&self) -> Option<TelegramUser>;
}

// =============================================================================
// Resolution result
// =============================================================================

/// Where the session identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Injected by the Telegram host.
    Platform,
    /// Deterministic guest fallback (non-platform browser context).
    GuestFallback,
    /// No identity could be established.
    Anonymous,
}

/// Resolved session identity; gates which UI surfaces are reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// The identity the session runs under, if any.
    pub user: Option<TelegramUser>,
    /// Employee record, if the identity is on staff.
    pub employee: Option<EmployeeIdentity>,
    /// How the identity was established.
    pub source: IdentitySource,
}

impl SessionIdentity {
    /// Whether the session belongs to a staff member.
    #[must_use]
    pub const fn is_employee(&self) -> bool {
        self.employee.is_some()
    }

    const fn anonymous() -> Self {
        Self {
            user: None,
            employee: None,
            source: IdentitySource::Anonymous,
        }
    }
}

/// Cancellation handle for an in-flight resolution (view unmount).
pub struct ResolverHandle {
    tx: watch::Sender<bool>,
}

impl ResolverHandle {
    /// Create a handle and the receiver to pass to [`resolve_identity`].
    #[must_use]
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, rx)
    }

    /// Cancel the resolution. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve the session identity.
///
/// Never fails: every degraded path (cancellation, gateway failure,
/// missing employee record) ends in a renderable identity state.
pub async fn resolve_identity<P, D>(
    platform: &P,
    directory: &D,
    mut cancel: watch::Receiver<bool>,
) -> SessionIdentity
where
    P: PlatformContext,
    D: EmployeeDirectory,
{
    let (user, source) = match poll_platform_user(platform, &mut cancel).await {
        PollOutcome::Cancelled => return SessionIdentity::anonymous(),
        PollOutcome::User(user) => (user, IdentitySource::Platform),
        PollOutcome::Exhausted => {
            if platform.init_data_present() {
                // Inside the Telegram host but no user object: do not
                // substitute a fake identity for a real platform session.
                info!("platform host detected but no user object; staying anonymous");
                return SessionIdentity::anonymous();
            }
            debug!("no platform host detected, using guest fallback");
            (TelegramUser::guest(), IdentitySource::GuestFallback)
        }
    };

    if source == IdentitySource::Platform {
        directory.register_identity(&user).await;
    }

    let employee = match directory
        .check_employee_access(user.id, user.username.as_deref())
        .await
    {
        Ok(record) => record,
        Err(err) => {
            // Degrade to "no employee record" rather than blocking render.
            warn!(error = %err, "employee lookup failed");
            None
        }
    };

    SessionIdentity {
        user: Some(user),
        employee,
        source,
    }
}

enum PollOutcome {
    User(TelegramUser),
    Exhausted,
    Cancelled,
}

/// Bounded poll for the late-injected platform user object.
async fn poll_platform_user<P: PlatformContext>(
    platform: &P,
    cancel: &mut watch::Receiver<bool>,
) -> PollOutcome {
    for attempt in 0..=MAX_POLL_ATTEMPTS {
        if let Some(user) = platform.current_user() {
            debug!(attempt, "platform user object available");
            return PollOutcome::User(user);
        }
        if attempt == MAX_POLL_ATTEMPTS {
            break;
        }
        tokio::select! {
            () = tokio::time::sleep(POLL_INTERVAL) => {}
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    debug!(attempt, "identity resolution cancelled");
                    return PollOutcome::Cancelled;
                }
            }
        }
    }
    PollOutcome::Exhausted
}
