use churchsite::{
    error::AppError,
    models::{
        Branch, BranchFields, ContentRecord, Direction, Event, EventFields, EventForm,
        Inspiration, InspirationFields, ListOrder, Sermon, SermonFields, SermonForm,
    },
    services::ContentService,
    test_utils::test_helpers,
};
use sqlx::SqlitePool;

async fn pool() -> SqlitePool {
    test_helpers::create_test_db().await.unwrap()
}

fn sermon(title: &str, date: &str) -> SermonFields {
    SermonFields {
        title: title.to_string(),
        speaker: "Pastor Ruth".to_string(),
        date: date.to_string(),
        scripture: Some("Psalm 23".to_string()),
        description: None,
    }
}

/// create → get → update → get → delete → delete → get, checking that the
/// stored row always equals the last fields written.
async fn full_round_trip<R>(
    service: ContentService<R>,
    first: R::Fields,
    second: R::Fields,
    stored: fn(&R) -> R::Fields,
) where
    R: ContentRecord,
    R::Fields: Clone + PartialEq + std::fmt::Debug,
{
    let id = service.create(first.clone()).await.unwrap();
    assert_eq!(stored(&service.get(id).await.unwrap()), first);

    service.update(id, second.clone()).await.unwrap();
    assert_eq!(
        stored(&service.get(id).await.unwrap()),
        second,
        "update is a full replace"
    );

    service.delete(id).await.unwrap();
    // Deleting again is not an error
    service.delete(id).await.unwrap();

    assert!(matches!(
        service.get(id).await,
        Err(AppError::NotFound(label)) if label == R::LABEL
    ));
}

#[tokio::test]
async fn sermon_round_trip() {
    full_round_trip(
        ContentService::<Sermon>::sqlite(pool().await),
        sermon("Still Waters", "2025-03-02"),
        SermonFields {
            title: "Green Pastures".to_string(),
            speaker: "Pastor Ruth".to_string(),
            date: "2025-03-09".to_string(),
            scripture: None,
            description: Some("Part two".to_string()),
        },
        |s: &Sermon| SermonFields {
            title: s.title.clone(),
            speaker: s.speaker.clone(),
            date: s.date.clone(),
            scripture: s.scripture.clone(),
            description: s.description.clone(),
        },
    )
    .await;
}

#[tokio::test]
async fn event_round_trip() {
    full_round_trip(
        ContentService::<Event>::sqlite(pool().await),
        EventFields {
            title: "Baptism Class".to_string(),
            description: Some("Bring a towel".to_string()),
            date: "2025-05-10".to_string(),
            time: Some("10:00".to_string()),
            location: Some("Chapel".to_string()),
            registration_required: true,
        },
        EventFields {
            title: "Baptism Service".to_string(),
            description: None,
            date: "2025-05-17".to_string(),
            time: None,
            location: None,
            registration_required: false,
        },
        |e: &Event| EventFields {
            title: e.title.clone(),
            description: e.description.clone(),
            date: e.date.clone(),
            time: e.time.clone(),
            location: e.location.clone(),
            registration_required: e.registration_required,
        },
    )
    .await;
}

#[tokio::test]
async fn branch_round_trip() {
    full_round_trip(
        ContentService::<Branch>::sqlite(pool().await),
        BranchFields {
            name: "East Branch".to_string(),
            address: "1 Sunrise Way".to_string(),
            phone: Some("+1-555-0999".to_string()),
            email: Some("east@church.com".to_string()),
            service_times: Some("Sunday 8:00 AM".to_string()),
        },
        BranchFields {
            name: "East Campus".to_string(),
            address: "2 Sunrise Way".to_string(),
            phone: None,
            email: None,
            service_times: None,
        },
        |b: &Branch| BranchFields {
            name: b.name.clone(),
            address: b.address.clone(),
            phone: b.phone.clone(),
            email: b.email.clone(),
            service_times: b.service_times.clone(),
        },
    )
    .await;
}

#[tokio::test]
async fn inspiration_round_trip() {
    full_round_trip(
        ContentService::<Inspiration>::sqlite(pool().await),
        InspirationFields {
            scripture: "The Lord is my shepherd".to_string(),
            quote: Some("Psalm 23:1".to_string()),
            author: Some("David".to_string()),
            date: "2025-07-01".to_string(),
        },
        InspirationFields {
            scripture: "Rejoice in the Lord always".to_string(),
            quote: None,
            author: None,
            date: "2025-07-02".to_string(),
        },
        |i: &Inspiration| InspirationFields {
            scripture: i.scripture.clone(),
            quote: i.quote.clone(),
            author: i.author.clone(),
            date: i.date.clone(),
        },
    )
    .await;
}

#[tokio::test]
async fn newest_sermon_is_listed_first() {
    let sermons = ContentService::<Sermon>::sqlite(pool().await);

    let id = sermons.create(sermon("X", "2025-01-01")).await.unwrap();
    let listed = sermons.list().await.unwrap();

    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].title, "X");
    assert!(listed.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn list_honours_requested_order() {
    let sermons = ContentService::<Sermon>::sqlite(pool().await);

    let by_title = sermons
        .list_ordered(ListOrder::parse::<Sermon>("title", Some("asc")).unwrap())
        .await
        .unwrap();
    let titles: Vec<_> = by_title.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Hope in Christ", "Love Your Neighbor", "The Power of Faith"]
    );

    assert!(matches!(
        ListOrder::parse::<Sermon>("description; DROP TABLE sermons", None),
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn default_orders_per_entity() {
    let pool = pool().await;

    let events = ContentService::<Event>::sqlite(pool.clone()).list().await.unwrap();
    assert!(events.windows(2).all(|w| w[0].date <= w[1].date));

    let branches = ContentService::<Branch>::sqlite(pool.clone()).list().await.unwrap();
    let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Main Campus", "North Branch", "South Branch"]);

    let inspirations = ContentService::<Inspiration>::sqlite(pool)
        .list()
        .await
        .unwrap();
    assert_eq!(inspirations[0].date, "2024-02-03");
}

#[test]
fn missing_required_field_is_a_validation_error() {
    let form = SermonForm {
        title: Some("Untitled speaker".to_string()),
        date: Some("2025-01-01".to_string()),
        ..Default::default()
    };

    let err = SermonFields::try_from(form).unwrap_err();
    assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("speaker")));
}

#[tokio::test]
async fn empty_strings_are_accepted_but_bad_dates_are_not() {
    let sermons = ContentService::<Sermon>::sqlite(pool().await);

    let id = sermons.create(sermon("", "")).await.unwrap();
    assert_eq!(sermons.get(id).await.unwrap().title, "");

    let err = sermons.create(sermon("Bad date", "March 1st")).await;
    assert!(matches!(err, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn unpadded_dates_are_rejected_so_text_order_stays_chronological() {
    let sermons = ContentService::<Sermon>::sqlite(pool().await);

    for loose in ["2025-1-1", "2025-9-5", " 2025-01-01", "+2025-01-01"] {
        let result = sermons.create(sermon("Loose", loose)).await;
        assert!(
            matches!(result, Err(AppError::Validation(_))),
            "{:?} should be rejected",
            loose
        );
    }

    for date in ["2025-01-01", "2025-09-05", "2025-12-01"] {
        sermons.create(sermon("Padded", date)).await.unwrap();
    }
    let dates: Vec<_> = sermons
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|s| s.title == "Padded")
        .map(|s| s.date)
        .collect();
    assert_eq!(dates, vec!["2025-12-01", "2025-09-05", "2025-01-01"]);
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let sermons = ContentService::<Sermon>::sqlite(pool().await);

    let result = sermons.update(9999, sermon("Ghost", "2025-01-01")).await;
    assert!(matches!(result, Err(AppError::NotFound("Sermon"))));
}

#[tokio::test]
async fn event_registration_flag_round_trips() {
    let events = ContentService::<Event>::sqlite(pool().await);

    let form = EventForm {
        title: Some("Baptism Class".to_string()),
        description: Some(String::new()),
        date: Some("2025-05-10".to_string()),
        time: Some("10:00".to_string()),
        location: Some("Chapel".to_string()),
        registration_required: Some("on".to_string()),
        csrf_token: String::new(),
    };
    let id = events
        .create(EventFields::try_from(form).unwrap())
        .await
        .unwrap();
    assert!(events.get(id).await.unwrap().registration_required);

    let unticked = EventForm {
        registration_required: None,
        ..EventForm::from(&events.get(id).await.unwrap())
    };
    events
        .update(id, EventFields::try_from(unticked).unwrap())
        .await
        .unwrap();
    assert!(!events.get(id).await.unwrap().registration_required);
}

#[tokio::test]
async fn second_inspiration_for_a_date_is_rejected() {
    let inspirations = ContentService::<Inspiration>::sqlite(pool().await);

    let fields = |scripture: &str| InspirationFields {
        scripture: scripture.to_string(),
        quote: None,
        author: None,
        date: "2025-12-25".to_string(),
    };

    inspirations.create(fields("Luke 2:11")).await.unwrap();
    let err = inspirations.create(fields("John 1:14")).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ref msg) if msg == "A daily inspiration already exists for that date"
    ));
    assert_eq!(
        inspirations
            .list_ordered(ListOrder::new("date", Direction::Desc))
            .await
            .unwrap()
            .len(),
        4
    );
}
