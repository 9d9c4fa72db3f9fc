//! Signed-in user and plan context
//!
//! A single `SessionContext` is owned by the app. Views take a
//! `SessionSubscription` to read the current session; dropping the
//! subscription is the unsubscribe.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Current user and plan. `None` user means signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub plan_price_id: Option<String>,
}

impl Session {
    pub fn plan(&self) -> Option<&'static ServicePackage> {
        self.plan_price_id.as_deref().and_then(plan_for_price_id)
    }
}

/// A purchasable service package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServicePackage {
    pub name: &'static str,
    pub price_id: &'static str,
    pub price: &'static str,
    pub description: &'static str,
}

pub const SERVICE_PACKAGES: [ServicePackage; 3] = [
    ServicePackage {
        name: "Starter",
        price_id: "price_1Rf6WQE2JA8BHiDgyXJmDFyh",
        price: "TTD 1,497",
        description: "Landing page or small business site",
    },
    ServicePackage {
        name: "Professional",
        price_id: "price_1ReqAIE2JA8BHiDgfDTR30aR",
        price: "TTD 2,497",
        description: "Multi-page site with CMS and integrations",
    },
    ServicePackage {
        name: "Enterprise",
        price_id: "price_1ReohkE2JA8BHiDg8XmR7rgz",
        price: "TTD 4,497",
        description: "Custom web application development",
    },
];

pub fn plan_for_price_id(price_id: &str) -> Option<&'static ServicePackage> {
    SERVICE_PACKAGES.iter().find(|p| p.price_id == price_id)
}

/// Publisher side of the session
#[derive(Debug)]
pub struct SessionContext {
    tx: watch::Sender<Session>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        let (tx, _rx) = watch::channel(session);
        Self { tx }
    }

    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> SessionSubscription {
        let mut rx = self.tx.subscribe();
        let current = rx.borrow_and_update().clone();
        SessionSubscription { rx, current }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn sign_in(&self, user: User) {
        tracing::info!(user = %user.email, "Signed in");
        self.tx.send_modify(|s| s.user = Some(user));
    }

    pub fn sign_out(&self) {
        tracing::info!("Signed out");
        self.tx.send_modify(|s| {
            s.user = None;
            s.plan_price_id = None;
        });
    }

    pub fn set_plan(&self, price_id: Option<String>) {
        self.tx.send_modify(|s| s.plan_price_id = price_id);
    }

    /// Replace the whole session, e.g. after settings are re-read
    pub fn publish(&self, session: Session) {
        match session.user {
            Some(user) => self.sign_in(user),
            None => self.sign_out(),
        }
        self.set_plan(session.plan_price_id);
    }
}

/// Read side held by a view
#[derive(Debug)]
pub struct SessionSubscription {
    rx: watch::Receiver<Session>,
    current: Session,
}

impl SessionSubscription {
    pub fn session(&self) -> &Session {
        &self.current
    }

    /// Pull the latest session. Returns true if it changed since last time.
    pub fn refresh(&mut self) -> bool {
        match self.rx.has_changed() {
            Ok(true) => {
                self.current = self.rx.borrow_and_update().clone();
                true
            }
            _ => false,
        }
    }
}
