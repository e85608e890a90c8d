//! Tests for the credential authenticator.
//!
//! The collaborators are replaced by scripted doubles that count session
//! opens and completions.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use authn_provider_sdk::{
    AuthProviderError, AuthStatus, AuthenticationProvider, AuthenticationRequest,
    AuthenticationService, Credential, Group, Principal, RequestAttributes, ServiceError, Session,
    SessionFactory, TokenShape,
};
use secrecy::{ExposeSecret, SecretString};
use tracing_test::traced_test;
use uuid::Uuid;

use super::decision::{AuthDecision, LOGIN_FAILED, Rejection};
use super::error::{AuthStage, DomainError};
use super::local_client::RestAuthenticationProvider;
use super::service::Service;

// =========================================================================
// Test doubles
// =========================================================================

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    completed: AtomicUsize,
}

impl Counters {
    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

struct CountingSession {
    id: String,
    principal: Option<Principal>,
    counters: Arc<Counters>,
    fail_complete: bool,
}

impl Session for CountingSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn current_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    fn set_current_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    fn complete(&mut self) -> Result<(), ServiceError> {
        self.counters.completed.fetch_add(1, Ordering::SeqCst);
        if self.fail_complete {
            return Err(ServiceError::Session("commit failed".to_owned()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct CountingSessions {
    counters: Arc<Counters>,
    fail_open: bool,
    fail_complete: bool,
}

impl SessionFactory for CountingSessions {
    fn open(&self) -> Result<Box<dyn Session>, ServiceError> {
        if self.fail_open {
            return Err(ServiceError::Unavailable("database down".to_owned()));
        }
        let n = self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSession {
            id: format!("session-{n}"),
            principal: None,
            counters: self.counters.clone(),
            fail_complete: self.fail_complete,
        }))
    }
}

#[derive(Clone, Copy)]
enum Step {
    Status(AuthStatus),
    Fault,
    Panic,
}

struct ScriptedAuthService {
    implicit: Step,
    explicit: Step,
    /// Email bound to the session when a check succeeds.
    email: Option<String>,
    /// `None` makes group resolution fail.
    groups: Option<Vec<&'static str>>,
    implicit_saw_credentials: AtomicBool,
    explicit_calls: AtomicUsize,
    explicit_names: Mutex<Vec<String>>,
}

impl ScriptedAuthService {
    fn new(implicit: Step, explicit: Step) -> Self {
        Self {
            implicit,
            explicit,
            email: Some("alice@example.org".to_owned()),
            groups: Some(Vec::new()),
            implicit_saw_credentials: AtomicBool::new(false),
            explicit_calls: AtomicUsize::new(0),
            explicit_names: Mutex::new(Vec::new()),
        }
    }

    fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_owned);
        self
    }

    fn with_groups(mut self, groups: Option<Vec<&'static str>>) -> Self {
        self.groups = groups;
        self
    }

    fn run(&self, step: Step, session: &mut dyn Session) -> Result<AuthStatus, ServiceError> {
        match step {
            Step::Status(status) => {
                if status.is_success() {
                    session.set_current_principal(Principal::new(Uuid::new_v4(), self.email.clone()));
                }
                Ok(status)
            }
            Step::Fault => Err(ServiceError::Unavailable("transport fault".to_owned())),
            Step::Panic => panic!("authentication backend crashed"),
        }
    }
}

impl AuthenticationService for ScriptedAuthService {
    fn authenticate_implicit(
        &self,
        session: &mut dyn Session,
        name: Option<&str>,
        secret: Option<&SecretString>,
        _request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError> {
        if name.is_some() || secret.is_some() {
            self.implicit_saw_credentials.store(true, Ordering::SeqCst);
        }
        self.run(self.implicit, session)
    }

    fn authenticate(
        &self,
        session: &mut dyn Session,
        name: &str,
        _secret: &SecretString,
        _request: &RequestAttributes,
    ) -> Result<AuthStatus, ServiceError> {
        self.explicit_calls.fetch_add(1, Ordering::SeqCst);
        self.explicit_names.lock().unwrap().push(name.to_owned());
        self.run(self.explicit, session)
    }

    fn special_groups(
        &self,
        _session: &dyn Session,
        _request: &RequestAttributes,
    ) -> Result<Vec<Group>, ServiceError> {
        self.groups
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| Group::new(Uuid::new_v4(), *name))
                    .collect()
            })
            .ok_or_else(|| ServiceError::Internal("group table unreadable".to_owned()))
    }
}

struct Harness {
    service: Service,
    auth: Arc<ScriptedAuthService>,
    counters: Arc<Counters>,
}

fn harness_with(auth: ScriptedAuthService, sessions: CountingSessions) -> Harness {
    let auth = Arc::new(auth);
    let counters = sessions.counters.clone();
    let service = Service::new(auth.clone(), Arc::new(sessions));
    Harness {
        service,
        auth,
        counters,
    }
}

fn harness(auth: ScriptedAuthService) -> Harness {
    harness_with(auth, CountingSessions::default())
}

fn credential(name: &str, secret: &str) -> Credential {
    Credential::new(name, SecretString::from(secret.to_owned()))
}

fn campus_request() -> RequestAttributes {
    RequestAttributes::new()
        .with_remote_addr("10.1.2.3".parse().unwrap())
        .with_session_id("http-session-1")
}

// =========================================================================
// Implicit authentication
// =========================================================================

#[test]
fn implicit_success_grants_special_groups_without_explicit_check() {
    let h = harness(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::Success),
            Step::Status(AuthStatus::BadCredentials),
        )
        .with_email(Some("campus@example.org"))
        .with_groups(Some(vec!["Campus", "Library Staff"])),
    );

    for (name, secret) in [("anything", "whatever"), ("", ""), ("bob@example.org", "wrong")] {
        let decision = h
            .service
            .authenticate(&credential(name, secret), &campus_request());

        let AuthDecision::Authenticated(token) = decision else {
            panic!("expected implicit success for name={name:?}");
        };
        assert_eq!(token.principal(), "campus@example.org");
        assert!(token.has_authority("Campus"));
        assert!(token.has_authority("Library Staff"));
        assert_eq!(token.authorities().len(), 2);
    }

    assert_eq!(h.auth.explicit_calls.load(Ordering::SeqCst), 0);
    assert!(!h.auth.implicit_saw_credentials.load(Ordering::SeqCst));
}

#[test]
fn implicit_success_without_principal_is_rejected() {
    let h = harness(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::Success),
            Step::Status(AuthStatus::Success),
        )
        .with_email(None),
    );

    let decision = h
        .service
        .authenticate(&credential("alice@example.org", "correct"), &campus_request());

    assert!(matches!(
        decision,
        AuthDecision::Rejected(Rejection::NoUsablePrincipal {
            stage: AuthStage::Implicit
        })
    ));
    assert_eq!(h.auth.explicit_calls.load(Ordering::SeqCst), 0);
}

// =========================================================================
// Explicit authentication
// =========================================================================

#[test]
fn explicit_success_returns_identity_with_groups() {
    let h = harness(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::BadArgs),
            Step::Status(AuthStatus::Success),
        )
        .with_email(Some("alice@example.org"))
        .with_groups(Some(vec!["Reviewers"])),
    );

    let decision = h.service.authenticate(
        &credential("alice@example.org", "correct"),
        &RequestAttributes::new(),
    );

    let AuthDecision::Authenticated(token) = decision else {
        panic!("expected explicit success");
    };
    assert_eq!(token.principal(), "alice@example.org");
    assert_eq!(
        token
            .authorities()
            .iter()
            .map(repo_security::GrantedAuthority::as_str)
            .collect::<Vec<_>>(),
        vec!["Reviewers"]
    );
    assert_eq!(
        token.credentials().map(ExposeSecret::expose_secret),
        Some("correct")
    );
    assert_eq!(
        *h.auth.explicit_names.lock().unwrap(),
        vec!["alice@example.org".to_owned()]
    );
}

#[test]
fn both_checks_failing_is_rejected_with_generic_message() {
    let h = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::BadArgs),
        Step::Status(AuthStatus::BadCredentials),
    ));
    let provider = RestAuthenticationProvider::new(Arc::new(h.service));

    let result = provider.authenticate(
        &AuthenticationRequest::username_password("bob@example.org", "wrong"),
        &RequestAttributes::new(),
    );

    match result {
        Err(AuthProviderError::BadCredentials(msg)) => assert_eq!(msg, "Login failed"),
        other => panic!("Expected BadCredentials, got: {other:?}"),
    }
}

#[test]
fn rejection_message_does_not_depend_on_failure_reason() {
    for status in [
        AuthStatus::BadCredentials,
        AuthStatus::NoSuchUser,
        AuthStatus::CertRequired,
        AuthStatus::BadArgs,
    ] {
        let h = harness(ScriptedAuthService::new(
            Step::Status(AuthStatus::BadArgs),
            Step::Status(status),
        ));

        let decision = h
            .service
            .authenticate(&credential("bob@example.org", "wrong"), &RequestAttributes::new());
        let AuthDecision::Rejected(rejection) = decision else {
            panic!("expected a rejection for {status}");
        };
        assert_eq!(rejection, Rejection::Failed { status });

        let err: AuthProviderError = rejection.into();
        assert_eq!(err.to_string(), LOGIN_FAILED);
    }
}

#[test]
fn explicit_success_with_blank_email_is_rejected() {
    let h = harness(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::NoSuchUser),
            Step::Status(AuthStatus::Success),
        )
        .with_email(Some("  ")),
    );
    let provider = RestAuthenticationProvider::new(Arc::new(h.service));

    let result = provider.authenticate(
        &AuthenticationRequest::username_password("alice@example.org", "correct"),
        &RequestAttributes::new(),
    );

    match result {
        Err(AuthProviderError::BadCredentials(msg)) => assert_eq!(msg, LOGIN_FAILED),
        other => panic!("Expected BadCredentials, got: {other:?}"),
    }
}

// =========================================================================
// Internal faults
// =========================================================================

#[test]
#[traced_test]
fn implicit_transport_fault_is_absorbed_and_logged() {
    let h = harness(ScriptedAuthService::new(
        Step::Fault,
        Step::Status(AuthStatus::Success),
    ));
    let counters = h.counters.clone();
    let provider = RestAuthenticationProvider::new(Arc::new(h.service));

    let result = provider.authenticate(
        &AuthenticationRequest::username_password("alice@example.org", "correct"),
        &RequestAttributes::new(),
    );

    assert!(matches!(result, Ok(None)));
    assert_eq!(counters.completed(), 1);
    assert!(logs_contain("Error while authenticating in the REST API"));
    assert!(logs_contain("transport fault"));
}

#[test]
fn explicit_fault_is_indeterminate() {
    let h = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::BadArgs),
        Step::Fault,
    ));

    let decision = h
        .service
        .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new());

    assert!(matches!(
        decision,
        AuthDecision::Indeterminate(DomainError::AuthenticationService {
            stage: AuthStage::Explicit,
            ..
        })
    ));
}

#[test]
fn group_resolution_fault_is_indeterminate() {
    let h = harness(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::BadArgs),
            Step::Status(AuthStatus::Success),
        )
        .with_groups(None),
    );

    let decision = h
        .service
        .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new());

    assert!(matches!(
        decision,
        AuthDecision::Indeterminate(DomainError::SpecialGroups(_))
    ));
}

#[test]
fn session_open_failure_is_indeterminate() {
    let h = harness_with(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::Success),
            Step::Status(AuthStatus::Success),
        ),
        CountingSessions {
            fail_open: true,
            ..CountingSessions::default()
        },
    );

    let decision = h
        .service
        .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new());

    assert!(matches!(
        decision,
        AuthDecision::Indeterminate(DomainError::SessionOpen(_))
    ));
    assert_eq!(h.counters.opened(), 0);
    assert_eq!(h.counters.completed(), 0);
}

// =========================================================================
// Session lifecycle
// =========================================================================

#[test]
fn session_is_completed_exactly_once_on_every_path() {
    let scenarios: [(Step, Step, fn(&AuthDecision) -> bool); 5] = [
        (
            Step::Status(AuthStatus::Success),
            Step::Status(AuthStatus::Success),
            AuthDecision::is_authenticated,
        ),
        (
            Step::Status(AuthStatus::BadArgs),
            Step::Status(AuthStatus::Success),
            AuthDecision::is_authenticated,
        ),
        (
            Step::Status(AuthStatus::BadArgs),
            Step::Status(AuthStatus::BadCredentials),
            AuthDecision::is_rejected,
        ),
        (
            Step::Fault,
            Step::Status(AuthStatus::Success),
            AuthDecision::is_indeterminate,
        ),
        (
            Step::Status(AuthStatus::BadArgs),
            Step::Fault,
            AuthDecision::is_indeterminate,
        ),
    ];

    for (implicit, explicit, expected) in scenarios {
        let h = harness(ScriptedAuthService::new(implicit, explicit));

        let decision = h
            .service
            .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new());

        assert!(expected(&decision), "unexpected decision: {decision:?}");
        assert_eq!(h.counters.opened(), 1);
        assert_eq!(h.counters.completed(), 1);
    }
}

#[test]
fn session_is_completed_when_the_backend_panics() {
    let h = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::BadArgs),
        Step::Panic,
    ));

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        h.service
            .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new())
    }));

    assert!(outcome.is_err());
    assert_eq!(h.counters.opened(), 1);
    assert_eq!(h.counters.completed(), 1);
}

#[test]
#[traced_test]
fn session_completion_failure_does_not_change_the_outcome() {
    let h = harness_with(
        ScriptedAuthService::new(
            Step::Status(AuthStatus::BadArgs),
            Step::Status(AuthStatus::Success),
        ),
        CountingSessions {
            fail_complete: true,
            ..CountingSessions::default()
        },
    );

    let decision = h
        .service
        .authenticate(&credential("alice@example.org", "correct"), &RequestAttributes::new());

    assert!(decision.is_authenticated());
    assert_eq!(h.counters.completed(), 1);
    assert!(logs_contain("Failed to complete authentication session"));
    assert!(logs_contain("commit failed"));
}

// =========================================================================
// Audit trail
// =========================================================================

#[test]
#[traced_test]
fn audit_records_attempt_type_and_failures() {
    let ok = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::BadArgs),
        Step::Status(AuthStatus::Success),
    ));
    let _ = ok.service.authenticate(
        &credential("alice@example.org", "s3cr3t-never-logged"),
        &campus_request(),
    );
    assert!(logs_contain("Login succeeded"));
    assert!(logs_contain("explicit"));

    let failing = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::BadArgs),
        Step::Status(AuthStatus::BadCredentials),
    ));
    let _ = failing.service.authenticate(
        &credential("bob@example.org", "s3cr3t-never-logged"),
        &campus_request(),
    );
    assert!(logs_contain("failed_login"));
    assert!(logs_contain("bob@example.org"));
    assert!(logs_contain("result=2"));

    assert!(!logs_contain("s3cr3t-never-logged"));
}

// =========================================================================
// Provider contract
// =========================================================================

#[test]
fn provider_supports_only_username_password() {
    let h = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::Success),
        Step::Status(AuthStatus::Success),
    ));
    let provider = RestAuthenticationProvider::new(Arc::new(h.service));

    assert!(provider.supports(TokenShape::UsernamePassword));
    assert!(!provider.supports(TokenShape::Bearer));
    assert!(!provider.supports(TokenShape::Anonymous));
}

#[test]
fn provider_does_not_decide_other_shapes() {
    let h = harness(ScriptedAuthService::new(
        Step::Status(AuthStatus::Success),
        Step::Status(AuthStatus::Success),
    ));
    let counters = h.counters.clone();
    let provider = RestAuthenticationProvider::new(Arc::new(h.service));

    let result = provider.authenticate(
        &AuthenticationRequest::Bearer(SecretString::from("opaque".to_owned())),
        &RequestAttributes::new(),
    );

    assert!(matches!(result, Ok(None)));
    assert_eq!(counters.opened(), 0);
}
