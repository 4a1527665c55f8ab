//! OTP form state machine: validation, submission outcomes, banner and
//! redirect timers. Time is paused so the 5 s delays run instantly.

mod common;

use std::time::Duration;

use tokio::time::Instant;

use common::{Harness, ScriptedVerifier};
use otpgate::action::Action;
use otpgate::error::VerifyError;
use otpgate::form::{INCOMPLETE_MESSAGE, LOGIN_NOTIFICATION, REDIRECT_MESSAGE};
use otpgate::session::SESSION_TOKEN_KEY;
use otpgate::{FormOptions, FormView, SubmitOutcome};

const FIVE_SECS: Duration = Duration::from_secs(5);

mod validation {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn short_codes_never_reach_the_verifier() {
        for len in 0..6 {
            let mut h = Harness::new(ScriptedVerifier::accepting());
            let code: String = "123456".chars().take(len).collect();
            assert!(h.form.input(&code));

            assert_eq!(h.form.submit(), SubmitOutcome::Incomplete);
            tokio::task::yield_now().await;

            let banner = h.form.banner().expect("banner shown");
            assert_eq!(banner.message, INCOMPLETE_MESSAGE);
            assert!(banner.is_error);
            assert_eq!(h.form.view(), FormView::Entry);
            assert!(h.verifier.calls().is_empty(), "len {len} hit the verifier");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_input_keeps_previous_value() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        assert!(h.form.input("12"));
        assert!(!h.form.input("12a"));
        assert!(!h.form.input("1234567"));
        assert_eq!(h.form.code().as_str(), "12");
    }
}

mod success {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn redirects_after_delay_and_notifies_once() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.input("123456");

        assert_eq!(h.form.submit(), SubmitOutcome::Sent);
        assert_eq!(h.form.view(), FormView::Loading);

        assert_eq!(h.step().await, Action::VerifyCompleted(Ok(())));
        let banner = h.form.banner().expect("banner shown");
        assert_eq!(banner.message, REDIRECT_MESSAGE);
        assert!(!banner.is_error);
        assert_eq!(h.form.view(), FormView::Loading);

        let accepted_at = Instant::now();
        tokio::time::advance(Duration::from_millis(4_900)).await;
        assert!(h.navigator.visited().is_empty());
        assert_eq!(h.form.view(), FormView::Loading);

        while h.navigator.visited().is_empty() {
            h.step().await;
        }
        assert!(accepted_at.elapsed() >= FIVE_SECS);

        assert_eq!(h.navigator.visited(), vec!["/dashboard"]);
        let notes = h.notifications.entries();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, LOGIN_NOTIFICATION);
        assert!(!notes[0].time.is_empty());
        assert_eq!(h.form.view(), FormView::Entry);

        // Nothing else navigates or notifies afterwards.
        while h.step_within(Duration::from_secs(30)).await.is_some() {}
        assert_eq!(h.navigator.visited().len(), 1);
        assert_eq!(h.notifications.entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn posts_code_and_session_token() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.input("654321");
        h.form.submit();
        h.step().await;

        let calls = h.verifier.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].otp, "654321");
        assert_eq!(calls[0].session_token.as_deref(), Some("session-abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_session_token_is_passed_as_none() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.session.remove(SESSION_TOKEN_KEY);
        h.form.input("654321");
        h.form.submit();
        h.step().await;

        assert_eq!(h.verifier.calls()[0].session_token, None);
    }

    #[tokio::test(start_paused = true)]
    async fn busy_form_ignores_input_and_resubmission() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.input("123456");
        assert_eq!(h.form.submit(), SubmitOutcome::Sent);

        assert!(!h.form.input("1"));
        assert_eq!(h.form.submit(), SubmitOutcome::Busy);
        h.step().await;

        assert_eq!(h.verifier.calls().len(), 1);
        assert_eq!(h.form.code().as_str(), "123456");
    }
}

mod failure {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn shows_server_message_and_stays_loading() {
        let mut h = Harness::new(ScriptedVerifier::rejecting(401, "Invalid OTP"));
        h.form.input("000000");
        h.form.submit();
        h.step().await;

        let banner = h.form.banner().expect("banner shown");
        assert_eq!(banner.message, "Invalid OTP");
        assert!(banner.is_error);
        // The loading placeholder is kept after a rejection unless
        // `release_on_failure` is set.
        assert_eq!(h.form.view(), FormView::Loading);

        while h.step_within(Duration::from_secs(30)).await.is_some() {}
        assert!(h.form.banner().is_none());
        assert!(h.navigator.visited().is_empty());
        assert!(h.notifications.entries().is_empty());
        assert_eq!(h.form.view(), FormView::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn release_on_failure_returns_to_form() {
        let options = FormOptions {
            release_on_failure: true,
            ..Default::default()
        };
        let mut h = Harness::with_options(ScriptedVerifier::rejecting(500, "Server error"), options);
        h.form.input("000000");
        h.form.submit();
        h.step().await;

        assert_eq!(h.form.view(), FormView::Entry);
        assert_eq!(h.form.banner().unwrap().message, "Server error");

        // and a second attempt goes through
        assert_eq!(h.form.submit(), SubmitOutcome::Sent);
        h.step().await;
        assert_eq!(h.verifier.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_gets_its_own_banner() {
        let mut h = Harness::new(ScriptedVerifier::new(Err(VerifyError::Transport {
            message: "connection refused".to_string(),
        })));
        h.form.input("123456");
        h.form.submit();
        h.step().await;

        let banner = h.form.banner().unwrap();
        assert_eq!(banner.message, "Unable to reach verification server");
        assert!(banner.is_error);
        assert!(h.navigator.visited().is_empty());
    }
}

mod banner {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn clears_itself_after_five_seconds() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        let start = Instant::now();
        h.form.submit();
        assert!(h.form.banner().is_some());

        let action = h.step().await;
        assert!(matches!(action, Action::BannerExpired(_)));
        assert!(start.elapsed() >= FIVE_SECS);
        assert!(start.elapsed() < FIVE_SECS + Duration::from_millis(100));
        assert!(h.form.banner().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_message_restarts_the_timer() {
        let mut h = Harness::new(ScriptedVerifier::rejecting(400, "OTP expired"));
        let start = Instant::now();
        h.form.submit();
        let first = h.form.banner().unwrap().generation;

        tokio::time::advance(Duration::from_secs(3)).await;
        h.form.input("123456");
        h.form.submit();
        h.step().await;
        let second = h.form.banner().unwrap().generation;
        assert_ne!(first, second);

        assert_eq!(h.step().await, Action::BannerExpired(second));
        assert!(start.elapsed() >= Duration::from_secs(8));
        assert!(h.form.banner().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn repeating_the_same_message_keeps_the_first_deadline() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        let start = Instant::now();
        h.form.submit();
        tokio::time::advance(Duration::from_secs(3)).await;
        h.form.submit();

        h.step().await;
        assert!(start.elapsed() < Duration::from_secs(6));
        assert!(h.form.banner().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_expiry_does_not_clear_newer_banner() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.submit();
        let first = h.form.banner().unwrap().generation;

        h.form.update(&Action::BannerExpired(first + 10));
        assert!(h.form.banner().is_some());
    }
}

mod unmount {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn cancels_redirect_and_banner_timers() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.input("123456");
        h.form.submit();
        h.step().await;

        h.form.unmount();
        assert!(!h.form.is_mounted());

        assert!(h.step_within(Duration::from_secs(30)).await.is_none());
        assert!(h.navigator.visited().is_empty());
        assert!(h.notifications.entries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_form_closes_the_channel() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.submit();
        let common::Harness { form, mut rx, .. } = h;
        drop(form);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn late_results_are_ignored() {
        let mut h = Harness::new(ScriptedVerifier::accepting());
        h.form.input("123456");
        h.form.submit();
        h.form.unmount();

        h.step().await;
        h.form.update(&Action::RedirectDue);
        assert!(h.form.banner().is_none());
        assert!(h.navigator.visited().is_empty());
        assert_eq!(h.form.submit(), SubmitOutcome::Unmounted);
    }
}
