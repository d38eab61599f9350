use std::sync::Arc;

use super::common::*;
use crate::clock::FixedClock;
use crate::ids::UserId;
use crate::workflows::staff::domain::{FIELD_AGE, FIELD_EXPERIENCE, FIELD_HOBBIES, FIELD_NAME, FIELD_WHY_US};
use crate::workflows::staff::{
    ApplicationForm, ApplicationStore, FormOffer, InMemoryApplicationStore,
    StaffApplicationError, StaffApplicationService, EXPERIENCE_PLACEHOLDER,
};

#[tokio::test]
async fn empty_experience_is_stored_as_placeholder() {
    let (service, _gateway) = service();

    let submission = service
        .submit(applicant(7), "helper", form(Some("")))
        .await
        .expect("submission stored");

    let stored = service
        .store()
        .get(&submission.application.id)
        .expect("store readable")
        .expect("record present");
    assert_eq!(stored.experience, EXPERIENCE_PLACEHOLDER);
    assert_eq!(stored.experience, "Не указано");
    assert_eq!(stored.name, "Ann");
    assert_eq!(stored.age, "19");
    assert_eq!(stored.position, "helper");
    assert_eq!(stored.position_name, "👥 Хелпер");
    assert_eq!(stored.submitted_at, submitted_at());
    assert!(!submission.application.id.0.is_empty());
}

#[tokio::test]
async fn provided_experience_is_kept_verbatim() {
    let (service, _gateway) = service();
    let experience = "  Два года модерировал сервер  ";

    let submission = service
        .submit(applicant(7), "helper", form(Some(experience)))
        .await
        .expect("submission stored");

    assert_eq!(submission.application.experience, experience);
}

#[tokio::test]
async fn submission_is_announced_with_reviewer_mention() {
    let (service, gateway) = service();

    let submission = service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("submission stored");

    let posts = gateway.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].application, submission.application);
    assert_eq!(posts[0].mention, Some(REVIEWER_ROLE));
    assert_eq!(submission.review_card, Some(card(1)));
}

#[tokio::test]
async fn missing_reviewer_role_omits_the_mention() {
    let gateway = Arc::new(RecordingGateway::default());
    let service = StaffApplicationService::with_clock(
        Arc::new(InMemoryApplicationStore::new()),
        gateway.clone(),
        positions(),
        None,
        Arc::new(FixedClock::new(submitted_at())),
    );

    service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("submission stored");

    assert_eq!(gateway.posts()[0].mention, None);
}

#[tokio::test]
async fn unreachable_review_channel_still_confirms_the_applicant() {
    let (service, gateway) = service_with(RecordingGateway {
        fail_post: true,
        ..RecordingGateway::default()
    });

    let submission = service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("submission confirmed");

    assert!(submission.review_card.is_none());
    assert!(gateway.posts().is_empty());
    assert!(service
        .store()
        .find_by_user(UserId(7))
        .expect("store readable")
        .is_some());
}

#[tokio::test]
async fn pending_user_is_refused_the_form() {
    let (service, _gateway) = service();
    let first = service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("first submission");

    match service.offer_form(UserId(7), "moderator") {
        Ok(FormOffer::AlreadyPending(existing)) => {
            assert_eq!(existing.id, first.application.id);
            let notice = existing.already_pending_notice();
            assert!(notice.contains(&first.application.id.0));
            assert!(notice.contains("👥 Хелпер"));
            assert!(notice.contains("<t:1751371200:R>"));
        }
        other => panic!("expected pending refusal, got {other:?}"),
    }
}

#[tokio::test]
async fn other_users_get_the_form() {
    let (service, _gateway) = service();
    service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("first submission");

    match service.offer_form(UserId(8), "moderator") {
        Ok(FormOffer::Open(spec)) => {
            assert_eq!(spec.position.key, "moderator");
            assert_eq!(spec.title, "Заявка: 🛡️ Модератор");
            assert_eq!(spec.fields.len(), 5);
            assert!(!spec.fields[4].required);
        }
        other => panic!("expected an open form, got {other:?}"),
    }
}

#[tokio::test]
async fn racing_second_submission_is_rejected_at_insert() {
    let (service, gateway) = service();
    service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("first submission");

    match service.submit(applicant(7), "admin", form(None)).await {
        Err(StaffApplicationError::AlreadyPending(existing)) => {
            assert_eq!(existing.position, "helper");
        }
        other => panic!("expected duplicate refusal, got {other:?}"),
    }
    assert_eq!(service.store().list().expect("store readable").len(), 1);
    assert_eq!(gateway.posts().len(), 1);
}

#[tokio::test]
async fn unknown_position_is_an_error() {
    let (service, _gateway) = service();

    assert!(matches!(
        service.offer_form(UserId(7), "designer"),
        Err(StaffApplicationError::UnknownPosition(key)) if key == "designer"
    ));
    assert!(matches!(
        service.submit(applicant(7), "designer", form(None)).await,
        Err(StaffApplicationError::UnknownPosition(_))
    ));
}

#[tokio::test]
async fn submissions_in_the_same_instant_get_distinct_ids() {
    let (service, _gateway) = service();
    let first = service
        .submit(applicant(7), "helper", form(None))
        .await
        .expect("first submission");
    let second = service
        .submit(applicant(8), "helper", form(None))
        .await
        .expect("second submission");

    assert_ne!(first.application.id, second.application.id);
}

#[test]
fn form_is_read_by_field_id() {
    let form = ApplicationForm::from_fields([
        (FIELD_NAME, "Ann"),
        (FIELD_AGE, "19"),
        (FIELD_WHY_US, "X"),
        (FIELD_HOBBIES, "Y"),
        (FIELD_EXPERIENCE, ""),
    ])
    .expect("complete form");

    assert_eq!(form.name, "Ann");
    assert_eq!(form.experience.as_deref(), Some(""));
    assert_eq!(form.experience_or_placeholder(), EXPERIENCE_PLACEHOLDER);
}

#[test]
fn form_without_a_required_field_names_it() {
    let result =
        ApplicationForm::from_fields([(FIELD_NAME, "Ann"), (FIELD_AGE, "19"), (FIELD_WHY_US, "X")]);
    assert_eq!(result, Err(FIELD_HOBBIES));
}
