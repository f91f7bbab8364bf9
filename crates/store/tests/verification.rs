//! Integration tests for the email-verification flow: token issuance,
//! dispatch through the mail seam, and invalidation on account change.

mod common;

use secrecy::SecretString;

use lavka_core::Role;
use lavka_store::db::AccountRepository;
use lavka_store::services::{MailError, MemoryMailer, TokenGenerator, VerificationService};

use common::{create_account, test_pool};

const SENDER: &str = "shop@example.com";

fn token_generator() -> TokenGenerator {
    TokenGenerator::new(SecretString::from("GxT7dYq2mW9pLc4NvZ8bRe1KsUh6Jf3A"))
}

fn code_from_body(body: &str) -> &str {
    body.strip_prefix("your confirmation code is ")
        .expect("mail body carries the fixed prefix")
}

#[tokio::test]
async fn confirmation_mail_carries_a_valid_code() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;

    let tokens = token_generator();
    let mailer = MemoryMailer::new();
    let service = VerificationService::new(&tokens, &mailer, SENDER);

    service
        .send_confirmation_code(&account)
        .await
        .expect("dispatch");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.to.as_str(), account.email.as_str());
    assert_eq!(mail.from, SENDER);
    assert_eq!(mail.subject, "Email Verification");

    let code = code_from_body(&mail.body);
    assert!(tokens.check_token(&account, code));
}

#[tokio::test]
async fn each_dispatch_issues_a_distinct_code() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;

    let tokens = token_generator();
    let mailer = MemoryMailer::new();
    let service = VerificationService::new(&tokens, &mailer, SENDER);

    service
        .send_confirmation_code(&account)
        .await
        .expect("first dispatch");
    service
        .send_confirmation_code(&account)
        .await
        .expect("second dispatch");

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    let first = code_from_body(&sent[0].body);
    let second = code_from_body(&sent[1].body);
    assert_ne!(first, second);
    // Both remain valid; issuing a new code does not revoke the old one.
    assert!(tokens.check_token(&account, first));
    assert!(tokens.check_token(&account, second));
}

#[tokio::test]
async fn role_change_invalidates_outstanding_codes() {
    let pool = test_pool().await;
    let repo = AccountRepository::new(&pool);
    let account = create_account(&pool, "masha").await;

    let tokens = token_generator();
    let mailer = MemoryMailer::new();
    let service = VerificationService::new(&tokens, &mailer, SENDER);
    service
        .send_confirmation_code(&account)
        .await
        .expect("dispatch");
    let sent = mailer.sent();
    let code = code_from_body(&sent[0].body);
    assert!(tokens.check_token(&account, code));

    repo.set_role(account.id, Role::Moderator)
        .await
        .expect("set role");
    let mutated = repo
        .get_by_id(account.id)
        .await
        .expect("query")
        .expect("account exists");
    assert!(!tokens.check_token(&mutated, code));
}

#[tokio::test]
async fn email_change_invalidates_outstanding_codes() {
    let pool = test_pool().await;
    let repo = AccountRepository::new(&pool);
    let account = create_account(&pool, "masha").await;

    let tokens = token_generator();
    let mailer = MemoryMailer::new();
    let service = VerificationService::new(&tokens, &mailer, SENDER);
    service
        .send_confirmation_code(&account)
        .await
        .expect("dispatch");
    let sent = mailer.sent();
    let code = code_from_body(&sent[0].body);
    assert!(tokens.check_token(&account, code));

    let new_email = lavka_core::Email::parse("masha.new@example.com").expect("valid email");
    repo.update_email(account.id, &new_email)
        .await
        .expect("update email");
    let mutated = repo
        .get_by_id(account.id)
        .await
        .expect("query")
        .expect("account exists");
    assert!(!tokens.check_token(&mutated, code));

    // A code issued against the new address checks out.
    service
        .send_confirmation_code(&mutated)
        .await
        .expect("dispatch");
    let sent = mailer.sent();
    assert_eq!(sent[1].to.as_str(), "masha.new@example.com");
    assert!(tokens.check_token(&mutated, code_from_body(&sent[1].body)));
}

#[tokio::test]
async fn transport_failure_surfaces_and_loses_the_code() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;

    let tokens = token_generator();
    let mailer = MemoryMailer::new();
    mailer.set_failing(true);
    let service = VerificationService::new(&tokens, &mailer, SENDER);

    let err = service
        .send_confirmation_code(&account)
        .await
        .expect_err("transport is down");
    assert!(matches!(err, MailError::Transport(_)));
    assert!(mailer.sent().is_empty());

    // A retry after recovery issues a fresh, valid code.
    mailer.set_failing(false);
    service
        .send_confirmation_code(&account)
        .await
        .expect("dispatch after recovery");
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(tokens.check_token(&account, code_from_body(&sent[0].body)));
}
