//! Integration tests for the ad repository against a real SQLite database.

mod common;

use barter_core::ad::{AdDraft, Category, Condition};
use barter_core::listing::AdFilter;
use barter_db::models::proposal::CreateProposal;
use barter_db::repositories::{AdRepo, ProposalRepo};
use common::{create_ad, create_user, test_db};

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_and_find_ad() {
    let db = test_db().await;
    let user = create_user(&db.pool, "alice").await;

    let ad = create_ad(
        &db.pool,
        user.id,
        "Laptop for Exchange",
        "A good condition laptop",
        Category::Electronics,
        Condition::Used,
    )
    .await;

    let found = AdRepo::find_by_id(&db.pool, ad.id).await.unwrap().unwrap();
    assert_eq!(found.user_id, user.id);
    assert_eq!(found.title, "Laptop for Exchange");
    assert_eq!(found.category, Category::Electronics);
    assert_eq!(found.condition, Condition::Used);
    assert_eq!(found.created_at, ad.created_at);
}

#[tokio::test]
async fn test_find_missing_ad_returns_none() {
    let db = test_db().await;
    assert!(AdRepo::find_by_id(&db.pool, 404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_replaces_fields_but_keeps_owner_and_timestamp() {
    let db = test_db().await;
    let user = create_user(&db.pool, "alice").await;
    let ad = create_ad(
        &db.pool,
        user.id,
        "Laptop",
        "Old description",
        Category::Electronics,
        Condition::Used,
    )
    .await;

    let draft = AdDraft {
        title: "Updated Laptop".into(),
        description: "New description".into(),
        image_url: Some("https://img.example.com/l.png".into()),
        category: Category::Other,
        condition: Condition::New,
    };
    let updated = AdRepo::update(&db.pool, ad.id, &draft)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Updated Laptop");
    assert_eq!(updated.image_url.as_deref(), Some("https://img.example.com/l.png"));
    assert_eq!(updated.category, Category::Other);
    assert_eq!(updated.user_id, user.id);
    assert_eq!(updated.created_at, ad.created_at);
}

#[tokio::test]
async fn test_update_missing_ad_returns_none() {
    let db = test_db().await;
    let draft = AdDraft {
        title: "x".into(),
        description: "y".into(),
        image_url: None,
        category: Category::Books,
        condition: Condition::New,
    };
    assert!(AdRepo::update(&db.pool, 77, &draft).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_cascades_to_proposals() {
    let db = test_db().await;
    let alice = create_user(&db.pool, "alice").await;
    let bob = create_user(&db.pool, "bob").await;
    let laptop = create_ad(&db.pool, alice.id, "Laptop", "d", Category::Electronics, Condition::Used).await;
    let books = create_ad(&db.pool, bob.id, "Books", "d", Category::Books, Condition::New).await;
    let chair = create_ad(&db.pool, bob.id, "Chair", "d", Category::Furniture, Condition::Used).await;

    let outgoing = ProposalRepo::create(
        &db.pool,
        &CreateProposal {
            ad_sender_id: laptop.id,
            ad_receiver_id: books.id,
            comment: "swap?".into(),
        },
    )
    .await
    .unwrap();
    let incoming = ProposalRepo::create(
        &db.pool,
        &CreateProposal {
            ad_sender_id: chair.id,
            ad_receiver_id: laptop.id,
            comment: "swap back?".into(),
        },
    )
    .await
    .unwrap();
    let unrelated = ProposalRepo::create(
        &db.pool,
        &CreateProposal {
            ad_sender_id: books.id,
            ad_receiver_id: chair.id,
            comment: "internal".into(),
        },
    )
    .await
    .unwrap();

    assert!(AdRepo::delete(&db.pool, laptop.id).await.unwrap());

    assert!(AdRepo::find_by_id(&db.pool, laptop.id).await.unwrap().is_none());
    assert!(ProposalRepo::find_by_id(&db.pool, outgoing.id).await.unwrap().is_none());
    assert!(ProposalRepo::find_by_id(&db.pool, incoming.id).await.unwrap().is_none());
    assert!(ProposalRepo::find_by_id(&db.pool, unrelated.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_missing_ad_returns_false() {
    let db = test_db().await;
    assert!(!AdRepo::delete(&db.pool, 5).await.unwrap());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

async fn seed_listing(db: &common::TestDb) {
    let alice = create_user(&db.pool, "alice").await;
    let bob = create_user(&db.pool, "bob").await;
    create_ad(
        &db.pool,
        alice.id,
        "Laptop for Exchange",
        "A good condition laptop",
        Category::Electronics,
        Condition::Used,
    )
    .await;
    create_ad(
        &db.pool,
        bob.id,
        "Books for Exchange",
        "Set of novels",
        Category::Books,
        Condition::New,
    )
    .await;
    create_ad(
        &db.pool,
        bob.id,
        "Gaming rig",
        "Comes with a LAPTOP stand",
        Category::Electronics,
        Condition::New,
    )
    .await;
}

fn titles(page: &barter_db::models::ad::AdPage) -> Vec<&str> {
    page.items.iter().map(|ad| ad.title.as_str()).collect()
}

#[tokio::test]
async fn test_text_query_matches_title_or_description_case_insensitively() {
    let db = test_db().await;
    seed_listing(&db).await;

    let filter = AdFilter::from_params(Some("laptop"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();

    assert_eq!(titles(&page), ["Laptop for Exchange", "Gaming rig"]);
    assert_eq!(page.page.total_count, 2);
}

#[tokio::test]
async fn test_text_query_is_literal() {
    let db = test_db().await;
    seed_listing(&db).await;

    let filter = AdFilter::from_params(Some("%"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_text_query_folds_case_beyond_ascii() {
    let db = test_db().await;
    let user = create_user(&db.pool, "olga").await;
    create_ad(&db.pool, user.id, "НОУТБУК Lenovo", "d", Category::Electronics, Condition::Used)
        .await;
    create_ad(&db.pool, user.id, "Chair", "ÉCOLE model", Category::Furniture, Condition::Used)
        .await;

    let filter = AdFilter::from_params(Some("ноутбук"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&page), ["НОУТБУК Lenovo"]);

    let filter = AdFilter::from_params(Some("école"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&page), ["Chair"]);
}

#[tokio::test]
async fn test_text_query_treats_regex_syntax_literally() {
    let db = test_db().await;
    let user = create_user(&db.pool, "olga").await;
    create_ad(&db.pool, user.id, "C++ primer (2nd ed.)", "d", Category::Books, Condition::Used)
        .await;
    create_ad(&db.pool, user.id, "Cxx primer", "d", Category::Books, Condition::Used).await;

    let filter = AdFilter::from_params(Some("c++ primer (2"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&page), ["C++ primer (2nd ed.)"]);

    let filter = AdFilter::from_params(Some(".*"), None, None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_category_and_condition_combine_with_and() {
    let db = test_db().await;
    seed_listing(&db).await;

    let filter = AdFilter::from_params(None, Some("electronics"), Some("used"));
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&page), ["Laptop for Exchange"]);

    let filter = AdFilter::from_params(Some("exchange"), Some("books"), None);
    let page = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&page), ["Books for Exchange"]);
}

#[tokio::test]
async fn test_unknown_category_yields_empty_page() {
    let db = test_db().await;
    seed_listing(&db).await;

    let filter = AdFilter::from_params(None, Some("vehicles"), None);
    let page = AdRepo::list_page(&db.pool, &filter, Some("3")).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page.total_count, 0);
    assert_eq!(page.page.number, 1);
}

#[tokio::test]
async fn test_pagination_is_stable_in_creation_order() {
    let db = test_db().await;
    let user = create_user(&db.pool, "alice").await;
    for i in 0..12 {
        create_ad(
            &db.pool,
            user.id,
            &format!("Ad {i}"),
            "Test ad",
            Category::Other,
            Condition::New,
        )
        .await;
    }
    let filter = AdFilter::from_params(None, None, None);

    let first = AdRepo::list_page(&db.pool, &filter, None).await.unwrap();
    assert_eq!(titles(&first), ["Ad 0", "Ad 1", "Ad 2", "Ad 3", "Ad 4"]);
    assert_eq!(first.page.num_pages, 3);
    assert_eq!(first.page.total_count, 12);

    let second = AdRepo::list_page(&db.pool, &filter, Some("2")).await.unwrap();
    assert_eq!(titles(&second), ["Ad 5", "Ad 6", "Ad 7", "Ad 8", "Ad 9"]);

    let last = AdRepo::list_page(&db.pool, &filter, Some("99")).await.unwrap();
    assert_eq!(last.page.number, 3);
    assert_eq!(titles(&last), ["Ad 10", "Ad 11"]);
    assert!(!last.page.has_next);
}
