//! Tests for the invoice form actions
//!
//! These tests verify that:
//! - Invalid submissions never reach the API
//! - Amounts are converted to cents before submission
//! - Every successful mutation revalidates the invoices page
//! - API failures surface the generic message and skip revalidation

mod harness;

use chrono::NaiveDate;
use dashboard::actions::form::{AMOUNT_NOT_POSITIVE, CUSTOMER_REQUIRED, STATUS_REQUIRED};
use dashboard::prelude::*;
use harness::{Call, FakeInvoiceService};
use std::sync::Arc;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

fn actions(service: &FakeInvoiceService) -> InvoiceActions {
    InvoiceActions::new(Arc::new(service.clone()), RevalidationBus::new(16)).with_date(date())
}

// =============================================================================
// create_invoice
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_sends_cents_and_redirects() {
        let service = FakeInvoiceService::new();
        let actions = actions(&service);

        let outcome = actions
            .create_invoice(
                &FormState::default(),
                &InvoiceFormData::new("cust-1", "250.75", "pending"),
            )
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));
        assert_eq!(
            service.calls(),
            vec![Call::Create(InvoicePayload {
                customer_id: "cust-1".to_string(),
                amount: 25_075,
                status: InvoiceStatus::Pending,
                date: "2024-05-17".to_string(),
                profile: CustomerProfile::default(),
            })]
        );
    }

    #[tokio::test]
    async fn test_create_uses_configured_profile() {
        let service = FakeInvoiceService::new();
        let profile = CustomerProfile {
            name: "Delba de Oliveira".to_string(),
            email: "delba@oliveira.com".to_string(),
            image_url: "/customers/delba-de-oliveira.png".to_string(),
        };
        let actions = actions(&service).with_profile(profile.clone());

        actions
            .create_invoice(&FormState::default(), &InvoiceFormData::new("c", "1", "paid"))
            .await
            .unwrap();

        match &service.calls()[0] {
            Call::Create(payload) => assert_eq!(payload.profile, profile),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_without_fixed_date_uses_today() {
        let service = FakeInvoiceService::new();
        let actions = InvoiceActions::new(Arc::new(service.clone()), RevalidationBus::default());

        actions
            .create_invoice(&FormState::default(), &InvoiceFormData::new("c", "3", "paid"))
            .await
            .unwrap();

        let calls = service.calls();
        let Call::Create(payload) = &calls[0] else {
            panic!("expected a create call");
        };
        assert!(NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").is_ok());
    }

    #[tokio::test]
    async fn test_invalid_create_returns_state_without_calling_api() {
        let service = FakeInvoiceService::new();
        let actions = actions(&service);
        let mut rx = actions.revalidation().subscribe();

        let outcome = actions
            .create_invoice(&FormState::default(), &InvoiceFormData::default())
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure, got {:?}", outcome);
        };
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Create Invoice.")
        );
        assert_eq!(state.errors["customerId"], vec![CUSTOMER_REQUIRED]);
        assert_eq!(state.errors["amount"], vec![AMOUNT_NOT_POSITIVE]);
        assert_eq!(state.errors["status"], vec![STATUS_REQUIRED]);
        assert!(service.calls().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_negative_amount() {
        let service = FakeInvoiceService::new();
        let outcome = actions(&service)
            .create_invoice(
                &FormState::default(),
                &InvoiceFormData::new("cust-1", "-10", "paid"),
            )
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(state.errors.len(), 1);
        assert!(state.errors.contains_key("amount"));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_amount_that_rounds_to_zero_cents() {
        let service = FakeInvoiceService::new();
        let outcome = actions(&service)
            .create_invoice(
                &FormState::default(),
                &InvoiceFormData::new("cust-1", "0.004", "paid"),
            )
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(state.errors["amount"], vec![AMOUNT_NOT_POSITIVE]);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_api_failure_is_generic_error() {
        let service = FakeInvoiceService::new().failing();
        let actions = actions(&service);

        let err = actions
            .create_invoice(&FormState::default(), &InvoiceFormData::new("c", "5", "paid"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to create invoice.");
        assert!(actions.revalidation().last_revalidated().is_none());
    }
}

// =============================================================================
// update_invoice
// =============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_revalidates_and_redirects() {
        let service = FakeInvoiceService::new();
        let actions = actions(&service);
        let mut rx = actions.revalidation().subscribe();

        let outcome = actions
            .update_invoice("inv-7", &InvoiceFormData::new("cust-2", "99.9", "paid"))
            .await
            .unwrap();

        assert_eq!(outcome, ActionOutcome::Redirect(INVOICES_PATH.to_string()));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event.path, INVOICES_PATH);
        assert_eq!(envelope.event.reason, RevalidationReason::InvoiceUpdated);

        let calls = service.calls();
        let Call::Update(id, payload) = &calls[0] else {
            panic!("expected an update call");
        };
        assert_eq!(id, "inv-7");
        assert_eq!(payload.amount, 9_990);
        assert_eq!(payload.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_invalid_update_reports_update_message() {
        let service = FakeInvoiceService::new();
        let outcome = actions(&service)
            .update_invoice("inv-7", &InvoiceFormData::new("cust-2", "10", "refunded"))
            .await
            .unwrap();

        let ActionOutcome::Invalid(state) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(
            state.message.as_deref(),
            Some("Missing Fields. Failed to Update Invoice.")
        );
        assert_eq!(state.errors["status"], vec![STATUS_REQUIRED]);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_forwards_ids_verbatim() {
        let service = FakeInvoiceService::new();
        actions(&service)
            .update_invoice(" inv-7 ", &InvoiceFormData::new(" cust-2 ", "1", "paid"))
            .await
            .unwrap();

        let calls = service.calls();
        let Call::Update(id, payload) = &calls[0] else {
            panic!("expected an update call");
        };
        assert_eq!(id, " inv-7 ");
        assert_eq!(payload.customer_id, " cust-2 ");
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let service = FakeInvoiceService::new();
        let err = actions(&service)
            .update_invoice("  ", &InvoiceFormData::new("c", "1", "paid"))
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Validation(_)));
        assert!(service.calls().is_empty());
    }
}

// =============================================================================
// delete_invoice
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_revalidates_without_redirect() {
        let service = FakeInvoiceService::new();
        let actions = actions(&service);
        let mut rx = actions.revalidation().subscribe();

        let outcome = actions.delete_invoice("inv-3").await.unwrap();

        assert_eq!(outcome, ActionOutcome::Revalidated);
        assert_eq!(service.calls(), vec![Call::Delete("inv-3".to_string())]);

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event.path, INVOICES_PATH);
        assert_eq!(envelope.event.reason, RevalidationReason::InvoiceDeleted);
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_revalidate() {
        let service = FakeInvoiceService::new().failing();
        let actions = actions(&service);

        let err = actions.delete_invoice("inv-3").await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to delete invoice.");
        assert!(actions.revalidation().last_revalidated().is_none());
    }
}
