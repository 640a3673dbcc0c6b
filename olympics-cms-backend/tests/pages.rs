mod common;

use axum::http::StatusCode;
use chrono::{TimeZone as _, Utc};
use common::Client;
use olympics_cms_database::models::{
    Athlete, Event, EventResult, EventStatus, MedalType, NewsCard, Sport, TallyRow,
};

fn athlete(name: &str, discipline: &str, is_out: bool) -> Athlete {
    Athlete {
        name: name.to_owned(),
        image: format!("/images/{name}.jpg"),
        discipline: discipline.to_owned(),
        is_out,
        medal_type: MedalType::None,
    }
}

fn event(day: u32, status: EventStatus, result: EventResult) -> Event {
    Event {
        opposition: None,
        discipline: "Hockey".to_owned(),
        status,
        result,
        begins_at: Utc.with_ymd_and_hms(2024, 8, day, 17, 30, 0).unwrap(),
        time: "17:30".to_owned(),
    }
}

#[tokio::test]
async fn front_page_sums_the_tally() {
    let mut client = Client::new().await;
    let tally = client.collection::<TallyRow>("tally");
    for (games, gold, silver, bronze) in [(Sport::Hockey, 3, 1, 0), (Sport::Judo, 1, 0, 2)] {
        tally
            .create(&TallyRow {
                games,
                gold,
                silver,
                bronze,
            })
            .await
            .unwrap();
    }
    let athletes = client.collection::<Athlete>("athletes");
    for (name, discipline) in [("Ana", "Judo"), ("Ben", "Hockey"), ("Cem", "Judo")] {
        athletes
            .create(&athlete(name, discipline, false))
            .await
            .unwrap();
    }

    let reply = client.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"<dd data-medal="gold">4</dd>"#));
    assert!(reply.body.contains(r#"<dd data-medal="silver">1</dd>"#));
    assert!(reply.body.contains(r#"<dd data-medal="bronze">2</dd>"#));
    assert!(reply.body.contains(r#"<dd data-stat="medals">7</dd>"#));
    assert!(reply.body.contains(r#"<dd data-stat="players">3</dd>"#));
    assert!(reply.body.contains(r#"<dd data-stat="disciplines">2</dd>"#));
}

#[tokio::test]
async fn front_page_lists_newest_news_first() {
    let mut client = Client::new().await;
    let news = client.collection::<NewsCard>("news");
    for (headline, day) in [("Older", 1), ("Newer", 5)] {
        news.create(&NewsCard {
            headline: headline.to_owned(),
            news_contents: "Contents".to_owned(),
            image: "/images/news.jpg".to_owned(),
            published_at: Utc.with_ymd_and_hms(2024, 8, day, 9, 0, 0).unwrap(),
        })
        .await
        .unwrap();
    }
    let reply = client.get("/").await;
    let newer = reply.body.find("Newer").unwrap();
    let older = reply.body.find("Older").unwrap();
    assert!(newer < older);
    assert!(reply.body.contains("August 5th 2024, 9:00:00 am"));
}

#[tokio::test]
async fn players_are_paged_by_25() {
    let mut client = Client::new().await;
    let athletes = client.collection::<Athlete>("athletes");
    for n in 1..=30 {
        athletes
            .create(&athlete(&format!("Athlete {n:02}"), "Rowing", false))
            .await
            .unwrap();
    }

    let first = client.get("/players").await;
    assert_eq!(first.count(r#"<tr class="player"#), 25);
    assert!(first.body.contains("Athlete 25"));
    assert!(!first.body.contains("Athlete 26"));

    let second = client.get("/players?page=2").await;
    assert_eq!(second.count(r#"<tr class="player"#), 5);
    assert!(second.body.contains("Athlete 30"));

    let past_the_end = client.get("/players?page=3").await;
    assert_eq!(past_the_end.status, StatusCode::OK);
    assert_eq!(past_the_end.count(r#"<tr class="player"#), 0);
}

#[tokio::test]
async fn players_are_paged_by_the_store() {
    let mut client = Client::with_listing(olympics_cms_config::ListingMode::Paged).await;
    let athletes = client.collection::<Athlete>("athletes");
    for n in 1..=30 {
        athletes
            .create(&athlete(&format!("Athlete {n:02}"), "Rowing", false))
            .await
            .unwrap();
    }
    let second = client.get("/players?page=2").await;
    assert_eq!(second.count(r#"<tr class="player"#), 5);
    assert!(second.body.contains("Athlete 26"));
}

#[tokio::test]
async fn eliminated_players_can_come_first() {
    let mut client = Client::new().await;
    let athletes = client.collection::<Athlete>("athletes");
    athletes
        .create(&athlete("Still In", "Golf", false))
        .await
        .unwrap();
    athletes
        .create(&athlete("Knocked Out", "Golf", true))
        .await
        .unwrap();

    let reply = client.get("/players?sort=out").await;
    assert!(reply.body.find("Knocked Out").unwrap() < reply.body.find("Still In").unwrap());
    let reply = client.get("/players").await;
    assert!(reply.body.find("Still In").unwrap() < reply.body.find("Knocked Out").unwrap());
}

#[tokio::test]
async fn disciplines_count_athletes() {
    let mut client = Client::new().await;
    let athletes = client.collection::<Athlete>("athletes");
    for (name, discipline) in [("Ana", "Judo"), ("Ben", "Hockey"), ("Cem", "Judo")] {
        athletes
            .create(&athlete(name, discipline, false))
            .await
            .unwrap();
    }
    let reply = client.get("/disciplines").await;
    assert_eq!(reply.count(r#"<tr class="discipline">"#), 2);
    assert!(reply.body.contains("<td>Judo</td>\n            <td>2</td>"));
}

#[tokio::test]
async fn completed_events_are_marked_with_and_without_a_day_filter() {
    let mut client = Client::new().await;
    let events = client.collection::<Event>("events");
    events
        .create(&event(8, EventStatus::Completed, EventResult::Win))
        .await
        .unwrap();
    events
        .create(&event(9, EventStatus::Upcoming, EventResult::Waiting))
        .await
        .unwrap();

    let all = client.get("/schedule").await;
    assert_eq!(all.count(r#"<tr class="event"#), 2);
    assert_eq!(all.count(r#"<tr class="event completed">"#), 1);
    assert!(all.body.contains("/images/world.jpg"));
    assert!(all.body.contains("August 8, 2024"));

    let eighth = client.get("/schedule?date=2024-08-08").await;
    assert_eq!(eighth.count(r#"<tr class="event"#), 1);
    assert_eq!(eighth.count(r#"<tr class="event completed">"#), 1);

    let ninth = client.get("/schedule?date=2024-08-09").await;
    assert_eq!(ninth.count(r#"<tr class="event"#), 1);
    assert_eq!(ninth.count(r#"<tr class="event completed">"#), 0);

    let garbage = client.get("/schedule?date=tomorrow").await;
    assert_eq!(garbage.count(r#"<tr class="event"#), 2);
}

#[tokio::test]
async fn full_news_shows_one_card() {
    let mut client = Client::new().await;
    let card = client
        .collection::<NewsCard>("news")
        .create(&NewsCard {
            headline: "Gold in Hockey".to_owned(),
            news_contents: "A long report.".to_owned(),
            image: "/images/hockey.jpg".to_owned(),
            published_at: Utc.with_ymd_and_hms(2024, 8, 8, 17, 30, 0).unwrap(),
        })
        .await
        .unwrap();

    let reply = client.get(&format!("/fullNews/{}", card.id)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<title>Gold in Hockey</title>"));
    assert!(reply.body.contains("A long report."));

    let missing = client.get("/fullNews/missing").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.contains("Error occurred while fetching news"));
}

#[tokio::test]
async fn store_failures_become_banners() {
    let mut client = Client::new().await;
    client.store.set_failing(true);

    let reply = client.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    for message in [
        "Failed to fetch athletes",
        "Failed to fetch tally",
        "Error occurred while fetching news",
        "Failed to fetch events",
    ] {
        assert!(reply.body.contains(message), "{message}");
    }
    assert!(reply.body.contains(r#"<dd data-medal="gold">0</dd>"#));

    let missing = client.get("/fullNews/abc").await;
    assert_eq!(missing.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn stylesheet_and_health() {
    let mut client = Client::new().await;
    assert_eq!(client.get("/index.css").await.status, StatusCode::OK);
    let health = client.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");
}

#[tokio::test]
async fn front_page_shows_the_schedule() {
    let mut client = Client::new().await;
    let events = client.collection::<Event>("events");
    events
        .create(&event(8, EventStatus::Completed, EventResult::Win))
        .await
        .unwrap();
    events
        .create(&event(9, EventStatus::Upcoming, EventResult::Waiting))
        .await
        .unwrap();

    let reply = client.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.count(r#"<tr class="event"#), 2);
    assert_eq!(reply.count(r#"<tr class="event completed">"#), 1);
    assert!(reply.body.contains("<td>August 9, 2024</td>"));
}

#[tokio::test]
async fn only_completed_events_are_greyed_out() {
    let mut client = Client::new().await;
    client
        .collection::<Event>("events")
        .create(&event(10, EventStatus::Upcoming, EventResult::Abandoned))
        .await
        .unwrap();

    let reply = client.get("/schedule?date=2024-08-10").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.count(r#"<tr class="event">"#), 1);
    assert!(reply.body.contains(r#"value="2024-08-10""#));
}
