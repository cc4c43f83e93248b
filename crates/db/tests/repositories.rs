//! Integration tests for the repositories and catalog queries.
//!
//! Each test receives a fresh database with the catalog migrations applied.

use chrono::NaiveDate;
use moviedb_core::types::DbId;
use moviedb_db::models::cast_member::CreateCastMember;
use moviedb_db::models::commentary::CreateCommentary;
use moviedb_db::models::movie::CreateMovie;
use moviedb_db::models::song::UpsertSong;
use moviedb_db::repositories::{
    CastMemberRepo, CatalogQueryRepo, CommentaryRepo, MovieRepo, Resolved, SongRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn new_movie(name: &str, released: (i32, u32, u32), director: &str) -> CreateMovie {
    CreateMovie {
        name: name.to_string(),
        release_date: NaiveDate::from_ymd_opt(released.0, released.1, released.2).unwrap(),
        director: director.to_string(),
        producer: "Producer".to_string(),
        music_director: "Music Director".to_string(),
        lyricist: "Lyricist".to_string(),
    }
}

async fn seed_movie(pool: &PgPool, input: &CreateMovie) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    MovieRepo::resolve(&mut conn, input).await.unwrap().id()
}

async fn seed_cast(pool: &PgPool, movie_id: DbId, names: &[&str]) {
    let mut conn = pool.acquire().await.unwrap();
    for name in names {
        let member = CastMemberRepo::resolve(
            &mut conn,
            &CreateCastMember {
                name: name.to_string(),
            },
        )
        .await
        .unwrap();
        CastMemberRepo::link_to_movie(&mut conn, movie_id, member.id())
            .await
            .unwrap();
    }
}

async fn seed_song(pool: &PgPool, movie_id: DbId, name: &str, song_order: i32) -> DbId {
    let mut conn = pool.acquire().await.unwrap();
    SongRepo::upsert(
        &mut conn,
        &UpsertSong {
            movie_id,
            name: name.to_string(),
            song_order,
        },
    )
    .await
    .unwrap()
}

async fn seed_commentary(
    pool: &PgPool,
    movie_id: DbId,
    song_id: Option<DbId>,
    kind: &str,
    language: &str,
    text: &str,
) -> Result<DbId, sqlx::Error> {
    let mut conn = pool.acquire().await.unwrap();
    CommentaryRepo::create(
        &mut conn,
        &CreateCommentary {
            movie_id,
            song_id,
            kind,
            language,
            text,
        },
    )
    .await
}

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn movie_get_or_create_reuses_existing_row(pool: PgPool) {
    let input = new_movie("Safar", (1970, 4, 17), "Asit Sen");
    let mut conn = pool.acquire().await.unwrap();

    let first = MovieRepo::resolve(&mut conn, &input).await.unwrap();
    assert!(matches!(first, Resolved::Created(_)));

    let mut changed = input.clone();
    changed.director = "Someone Else".to_string();
    let second = MovieRepo::resolve(&mut conn, &changed).await.unwrap();
    assert_eq!(second, Resolved::Existing(first.id()));
    drop(conn);

    let stored = MovieRepo::find_by_id(&pool, first.id()).await.unwrap().unwrap();
    assert_eq!(stored.director, "Asit Sen");
    assert_eq!(MovieRepo::count_by_name(&pool, "Safar").await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cast_link_is_created_once(pool: PgPool) {
    let movie_id = seed_movie(&pool, &new_movie("Safar", (1970, 4, 17), "Asit Sen")).await;
    let mut conn = pool.acquire().await.unwrap();
    let member = CastMemberRepo::resolve(
        &mut conn,
        &CreateCastMember {
            name: "Rajesh Khanna".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(CastMemberRepo::link_to_movie(&mut conn, movie_id, member.id())
        .await
        .unwrap());
    assert!(!CastMemberRepo::link_to_movie(&mut conn, movie_id, member.id())
        .await
        .unwrap());
    drop(conn);

    assert_eq!(CastMemberRepo::count_movies(&pool, member.id()).await.unwrap(), 1);
    let found = CastMemberRepo::find_by_name(&pool, "Rajesh Khanna")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, member.id());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn song_upsert_keeps_id_and_updates_order(pool: PgPool) {
    let movie_id = seed_movie(&pool, &new_movie("Safar", (1970, 4, 17), "Asit Sen")).await;

    let first = seed_song(&pool, movie_id, "Zindagi Ka Safar", 1).await;
    let again = seed_song(&pool, movie_id, "Zindagi Ka Safar", 3).await;
    assert_eq!(first, again);

    let songs = SongRepo::list_for_movie(&pool, movie_id).await.unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].song_order, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_song_name_in_two_movies_is_two_rows(pool: PgPool) {
    let a = seed_movie(&pool, &new_movie("A", (1970, 1, 1), "X")).await;
    let b = seed_movie(&pool, &new_movie("B", (1971, 1, 1), "X")).await;

    let song_a = seed_song(&pool, a, "Title Song", 1).await;
    let song_b = seed_song(&pool, b, "Title Song", 1).await;
    assert_ne!(song_a, song_b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn commentary_cannot_reference_another_movies_song(pool: PgPool) {
    let a = seed_movie(&pool, &new_movie("A", (1970, 1, 1), "X")).await;
    let b = seed_movie(&pool, &new_movie("B", (1971, 1, 1), "X")).await;
    let song_of_b = seed_song(&pool, b, "Only In B", 1).await;

    let err = seed_commentary(&pool, a, Some(song_of_b), "long", "Hindi", "text")
        .await
        .unwrap_err();
    assert!(moviedb_db::is_constraint_violation(&err));
    assert!(!moviedb_db::is_connectivity_error(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn commentary_rows_are_appended(pool: PgPool) {
    let movie_id = seed_movie(&pool, &new_movie("Safar", (1970, 4, 17), "Asit Sen")).await;
    let song_id = seed_song(&pool, movie_id, "Zindagi Ka Safar", 1).await;

    for _ in 0..2 {
        seed_commentary(&pool, movie_id, None, "short", "Hindi", "film")
            .await
            .unwrap();
    }
    seed_commentary(&pool, movie_id, Some(song_id), "short", "Hindi", "song")
        .await
        .unwrap();

    let rows = CommentaryRepo::list_for_movie(&pool, movie_id).await.unwrap();
    assert_eq!(rows.len(), 3);
    // Movie-level rows sort first.
    assert_eq!(rows[0].song_id, None);
    assert_eq!(rows[1].song_id, None);
    assert_eq!(rows[2].song_id, Some(song_id));
    assert!(rows.iter().all(|r| r.commentary_type == "short"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn commentary_kind_is_stored_verbatim(pool: PgPool) {
    let movie_id = seed_movie(&pool, &new_movie("Safar", (1970, 4, 17), "Asit Sen")).await;
    seed_commentary(&pool, movie_id, None, "detailed", "Hindi", "film")
        .await
        .unwrap();

    let text = CatalogQueryRepo::movie_commentary(&pool, "Safar", "detailed", "Hindi")
        .await
        .unwrap();
    assert_eq!(text.as_deref(), Some("film"));
    let none = CatalogQueryRepo::movie_commentary(&pool, "Safar", "long", "Hindi")
        .await
        .unwrap();
    assert_eq!(none, None);
}

// ---------------------------------------------------------------------------
// Connectivity check
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_and_schema_checks_pass(pool: PgPool) {
    moviedb_db::health_check(&pool).await.unwrap();

    let version = moviedb_db::server_version(&pool).await.unwrap();
    assert!(version.starts_with("PostgreSQL"));

    let status = moviedb_db::verify_schema(&pool).await.unwrap();
    assert!(status.is_complete(), "missing: {:?}", status.missing);
    for table in moviedb_db::EXPECTED_TABLES {
        assert!(status.tables.iter().any(|t| t == table));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn schema_check_reports_missing_table(pool: PgPool) {
    sqlx::query("DROP TABLE commentaries")
        .execute(&pool)
        .await
        .unwrap();

    let status = moviedb_db::verify_schema(&pool).await.unwrap();
    assert!(!status.is_complete());
    assert_eq!(status.missing, vec!["commentaries"]);
}

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

/// Two movies sharing one cast member, with songs and commentary.
async fn seed_catalog(pool: &PgPool) -> (DbId, DbId) {
    let aan = seed_movie(pool, &new_movie("Aan Milo Sajna", (1970, 12, 25), "Mukul Dutt")).await;
    let safar = seed_movie(pool, &new_movie("Safar", (1970, 4, 17), "Asit Sen")).await;
    seed_cast(pool, aan, &["Rajesh Khanna", "Asha Parekh"]).await;
    seed_cast(pool, safar, &["Sharmila Tagore", "Rajesh Khanna"]).await;

    let achha = seed_song(pool, aan, "Achha To Hum Chalte Hain", 1).await;
    seed_song(pool, aan, "Jo Tumko Ho Pasand", 2).await;
    seed_song(pool, safar, "Zindagi Ka Safar", 1).await;

    seed_commentary(pool, aan, None, "long", "Hindi", "Pehla Rain drama")
        .await
        .unwrap();
    seed_commentary(pool, aan, Some(achha), "long", "Hindi", "A duet in the RAIN")
        .await
        .unwrap();
    seed_commentary(pool, safar, None, "short", "English", "Life and loss")
        .await
        .unwrap();

    (aan, safar)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_movies_aggregates_sorted_cast(pool: PgPool) {
    seed_catalog(&pool).await;
    seed_movie(&pool, &new_movie("Uncast", (1980, 1, 1), "Nobody")).await;

    let movies = CatalogQueryRepo::list_movies_with_cast(&pool).await.unwrap();
    let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Aan Milo Sajna", "Safar", "Uncast"]);
    assert_eq!(movies[0].cast_names, "Asha Parekh, Rajesh Khanna");
    assert_eq!(movies[1].cast_names, "Rajesh Khanna, Sharmila Tagore");
    assert_eq!(movies[2].cast_names, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn songs_for_movie_follow_ordinal(pool: PgPool) {
    seed_catalog(&pool).await;

    let songs = CatalogQueryRepo::songs_for_movie(&pool, "Aan Milo Sajna")
        .await
        .unwrap();
    let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Achha To Hum Chalte Hain", "Jo Tumko Ho Pasand"]);
    assert!(CatalogQueryRepo::songs_for_movie(&pool, "Missing")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn movie_commentary_filters_kind_and_language(pool: PgPool) {
    let (aan, _) = seed_catalog(&pool).await;

    let text = CatalogQueryRepo::movie_commentary(
        &pool,
        "Aan Milo Sajna",
        "long",
        "Hindi",
    )
    .await
    .unwrap();
    assert_eq!(text.as_deref(), Some("Pehla Rain drama"));

    let none = CatalogQueryRepo::movie_commentary(
        &pool,
        "Aan Milo Sajna",
        "short",
        "Hindi",
    )
    .await
    .unwrap();
    assert_eq!(none, None);

    // The most recent row wins when commentary was appended twice.
    seed_commentary(&pool, aan, None, "long", "Hindi", "Revised")
        .await
        .unwrap();
    let latest = CatalogQueryRepo::movie_commentary(
        &pool,
        "Aan Milo Sajna",
        "long",
        "Hindi",
    )
    .await
    .unwrap();
    assert_eq!(latest.as_deref(), Some("Revised"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn song_commentary_by_song_name(pool: PgPool) {
    seed_catalog(&pool).await;

    let text = CatalogQueryRepo::song_commentary(
        &pool,
        "Achha To Hum Chalte Hain",
        "long",
        "Hindi",
    )
    .await
    .unwrap();
    assert_eq!(text.as_deref(), Some("A duet in the RAIN"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_is_case_insensitive_and_labels_subject(pool: PgPool) {
    seed_catalog(&pool).await;

    let hits = CatalogQueryRepo::search_commentaries(&pool, "rain").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.movie_name == "Aan Milo Sajna"));
    assert_eq!(hits[0].subject, "Movie");
    assert_eq!(hits[1].subject, "Achha To Hum Chalte Hain");

    assert!(CatalogQueryRepo::search_commentaries(&pool, "   ")
        .await
        .unwrap()
        .is_empty());
    // Wildcards in the keyword are matched literally.
    assert!(CatalogQueryRepo::search_commentaries(&pool, "%")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn movies_by_cast_member_newest_first(pool: PgPool) {
    seed_catalog(&pool).await;

    let movies = CatalogQueryRepo::movies_by_cast_member(&pool, "khanna")
        .await
        .unwrap();
    let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Aan Milo Sajna", "Safar"]);

    let movies = CatalogQueryRepo::movies_by_cast_member(&pool, "Tagore")
        .await
        .unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].director, "Asit Sen");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_movie_gathers_everything(pool: PgPool) {
    seed_catalog(&pool).await;

    let movie = CatalogQueryRepo::complete_movie(&pool, "Aan Milo Sajna")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(movie.movie.director, "Mukul Dutt");
    assert_eq!(movie.cast.len(), 2);
    assert_eq!(movie.songs.len(), 2);
    assert_eq!(movie.commentary.as_deref(), Some("Pehla Rain drama"));

    // Safar only has short English commentary; the default is long Hindi.
    let safar = CatalogQueryRepo::complete_movie(&pool, "Safar")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(safar.commentary, None);

    assert!(CatalogQueryRepo::complete_movie(&pool, "Missing")
        .await
        .unwrap()
        .is_none());
}
