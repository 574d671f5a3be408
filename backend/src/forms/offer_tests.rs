//! Tests for offer creation and application forms.

use chrono::TimeZone;
use rstest::rstest;

use super::*;
use crate::forms::field::REQUIRED_MESSAGE;
use crate::forms::submission::Submission;

fn valid_offer(organization: &OrganizationId) -> Submission {
    Submission::new()
        .with_field("organization", organization.as_ref())
        .with_field("description", "Help at the animal shelter")
        .with_field("requirements", "Patience with animals")
        .with_field("time_commitment", "Two afternoons a week")
        .with_field("benefits", "Training provided")
        .with_field("location", "Poznań")
        .with_field("title", "Shelter assistant")
        .with_field("time_period", "Spring 2026")
}

#[rstest]
fn binds_a_minimal_valid_submission() {
    let organization = OrganizationId::random();

    let draft = OfferForm
        .validate(&valid_offer(&organization))
        .expect("minimal offer must bind");

    assert_eq!(draft.organization, organization);
    assert_eq!(draft.description, "Help at the animal shelter");
    assert_eq!(draft.title, "Shelter assistant");
    assert!(draft.status_old.is_none());
    assert!(draft.started_at.is_none());
    assert!(!draft.reserve_recruitment);
    assert!(!draft.action_ongoing);
    assert!(!draft.constant_coop);
    assert!(draft.volunteers_limit.is_none());
}

#[rstest]
fn binds_scheduling_details() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("status_old", "archived")
        .with_field("started_at", "2026-06-01T09:00:00Z")
        .with_field("finished_at", "2026-06-30T17:00:00Z")
        .with_field("recruitment_start_date", "2026-05-01")
        .with_field("recruitment_end_date", "2026-05-20")
        .with_field("reserve_recruitment", "on")
        .with_field("reserve_recruitment_start_date", "2026-05-21")
        .with_field("reserve_recruitment_end_date", "2026-05-28")
        .with_field("action_ongoing", "false")
        .with_field("constant_coop", "true")
        .with_field("action_start_date", "2026-06-01")
        .with_field("action_end_date", "2026-06-30")
        .with_field("volunteers_limit", " 25 ")
        .with_field("reserve_volunteers_limit", "5");

    let draft = OfferForm
        .validate(&submission)
        .expect("scheduling details must bind");

    assert_eq!(draft.status_old.as_deref(), Some("archived"));
    assert_eq!(
        draft.started_at,
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).single()
    );
    assert_eq!(
        draft.recruitment_start_date,
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).single()
    );
    assert!(draft.reserve_recruitment);
    assert!(!draft.action_ongoing);
    assert!(draft.constant_coop);
    assert_eq!(draft.volunteers_limit, Some(25));
    assert_eq!(draft.reserve_volunteers_limit, Some(5));
}

#[rstest]
#[case("started_at", "finished_at", ACTION_DATES_MESSAGE)]
#[case("recruitment_start_date", "recruitment_end_date", RECRUITMENT_DATES_MESSAGE)]
#[case(
    "reserve_recruitment_start_date",
    "reserve_recruitment_end_date",
    RESERVE_DATES_MESSAGE
)]
fn an_inverted_date_pair_marks_both_slots(
    #[case] start: &str,
    #[case] end: &str,
    #[case] message: &str,
) {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field(start, "2026-06-02")
        .with_field(end, "2026-06-01");

    let error = OfferForm
        .validate(&submission)
        .expect_err("inverted dates must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.field_messages(start), [message]);
    assert_eq!(bag.field_messages(end), [message]);
    assert_eq!(bag.message_count(), 2);
}

#[rstest]
#[case::equal("2026-06-01", "2026-06-01")]
#[case::ordered("2026-06-01", "2026-06-02")]
fn an_ordered_date_pair_passes(#[case] start: &str, #[case] end: &str) {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("started_at", start)
        .with_field("finished_at", end);

    let draft = OfferForm
        .validate(&submission)
        .expect("ordered dates must pass");
    assert!(draft.started_at.is_some());
}

#[rstest]
#[case::start_only("started_at")]
#[case::end_only("finished_at")]
fn a_half_filled_date_pair_passes(#[case] slot: &str) {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization).with_field(slot, "2026-06-01");

    OfferForm
        .validate(&submission)
        .expect("a half-filled pair must pass");
}

#[rstest]
fn every_inverted_pair_reports_independently() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("started_at", "2026-06-02")
        .with_field("finished_at", "2026-06-01")
        .with_field("recruitment_start_date", "2026-05-20")
        .with_field("recruitment_end_date", "2026-05-01")
        .with_field("reserve_recruitment_start_date", "2026-05-28")
        .with_field("reserve_recruitment_end_date", "2026-05-21");

    let error = OfferForm
        .validate(&submission)
        .expect_err("three inverted pairs must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.message_count(), 6);
    assert_eq!(bag.field_messages("started_at"), [ACTION_DATES_MESSAGE]);
    assert_eq!(
        bag.field_messages("recruitment_end_date"),
        [RECRUITMENT_DATES_MESSAGE]
    );
    assert_eq!(
        bag.field_messages("reserve_recruitment_start_date"),
        [RESERVE_DATES_MESSAGE]
    );
}

#[rstest]
fn the_action_period_dates_bind_without_an_ordering_check() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("action_start_date", "2026-06-30")
        .with_field("action_end_date", "2026-06-01");

    let draft = OfferForm
        .validate(&submission)
        .expect("no ordering applies to the action period");
    assert!(draft.action_start_date > draft.action_end_date);
}

#[rstest]
fn sibling_field_errors_do_not_suppress_date_checks() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("title", "x".repeat(TITLE_MAX + 1))
        .with_field("recruitment_start_date", "2026-05-20")
        .with_field("recruitment_end_date", "2026-05-01");

    let error = OfferForm
        .validate(&submission)
        .expect_err("both problems must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.field_messages("title").len(), 1);
    assert_eq!(
        bag.field_messages("recruitment_start_date"),
        [RECRUITMENT_DATES_MESSAGE]
    );
    assert_eq!(
        bag.field_messages("recruitment_end_date"),
        [RECRUITMENT_DATES_MESSAGE]
    );
}

#[rstest]
fn a_bad_limit_and_an_inverted_pair_report_together() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization)
        .with_field("volunteers_limit", "many")
        .with_field("started_at", "2026-06-02")
        .with_field("finished_at", "2026-06-01");

    let error = OfferForm
        .validate(&submission)
        .expect_err("both problems must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.message_count(), 3);
    assert_eq!(
        bag.field_messages("volunteers_limit"),
        ["enter a whole number"]
    );
    assert_eq!(bag.field_messages("started_at"), [ACTION_DATES_MESSAGE]);
}

#[rstest]
fn a_malformed_organization_token_rejects() {
    let organization = OrganizationId::random();
    let submission = valid_offer(&organization).with_field("organization", "org-1");

    let error = OfferForm
        .validate(&submission)
        .expect_err("a malformed token must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(
        bag.field_messages("organization"),
        [ORGANIZATION_MALFORMED]
    );
}

#[rstest]
fn an_empty_submission_reports_every_required_field() {
    let error = OfferForm
        .validate(&Submission::new())
        .expect_err("an empty submission must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.message_count(), 8);
    for field in [
        "organization",
        "description",
        "requirements",
        "time_commitment",
        "benefits",
        "location",
        "title",
        "time_period",
    ] {
        assert_eq!(bag.field_messages(field), [REQUIRED_MESSAGE]);
    }
}

#[rstest]
fn an_application_binds_with_plain_text_contact_details() {
    let submission = Submission::new()
        .with_field("email", "not-an-email")
        .with_field("phone_no", "+48 555 0100")
        .with_field("fullname", "Ada Lovelace");

    let application = OfferApplicationForm
        .validate(&submission)
        .expect("plain-text contact details must bind");

    assert_eq!(application.email, "not-an-email");
    assert_eq!(application.phone_no, "+48 555 0100");
    assert_eq!(application.fullname, "Ada Lovelace");
    assert!(application.comments.is_none());
}

#[rstest]
fn an_application_keeps_submitted_comments() {
    let submission = Submission::new()
        .with_field("email", "ada@example.org")
        .with_field("phone_no", "555 0100")
        .with_field("fullname", "Ada Lovelace")
        .with_field("comments", "  available on weekends  ");

    let application = OfferApplicationForm
        .validate(&submission)
        .expect("comments must bind");
    assert_eq!(application.comments.as_deref(), Some("available on weekends"));
}

#[rstest]
fn an_application_rejects_over_limit_contact_details() {
    let long = "x".repeat(APPLICATION_FIELD_MAX + 1);
    let submission = Submission::new()
        .with_field("email", long.clone())
        .with_field("phone_no", long.clone())
        .with_field("fullname", long)
        .with_field("comments", "fine");

    let error = OfferApplicationForm
        .validate(&submission)
        .expect_err("over-limit details must reject");

    let bag = error.field_errors().expect("rejected carries the bag");
    assert_eq!(bag.message_count(), 3);
    for field in ["email", "phone_no", "fullname"] {
        assert_eq!(bag.field_messages(field).len(), 1);
    }
}
