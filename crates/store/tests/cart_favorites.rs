//! Integration tests for cart and favorites membership rows.

mod common;

use lavka_store::db::{CartRepository, FavoriteRepository, ProductRepository};

use common::{create_account, create_group, create_product, test_pool};

#[tokio::test]
async fn cart_add_list_remove() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;
    let group = create_group(&pool, "Bakery", "bakery").await;
    let bread = create_product(&pool, account.id, group.id, "Bread", "B100").await;
    let milk = create_product(&pool, account.id, group.id, "Milk", "M200").await;

    let carts = CartRepository::new(&pool);
    carts.add(account.id, bread.id).await.expect("add bread");
    carts.add(account.id, milk.id).await.expect("add milk");

    let contents = carts.products_for(account.id).await.expect("list cart");
    assert_eq!(contents, [bread.id, milk.id]);

    assert!(carts.remove(account.id, bread.id).await.expect("remove"));
    assert!(!carts
        .remove(account.id, bread.id)
        .await
        .expect("second remove"));
    let contents = carts.products_for(account.id).await.expect("list cart");
    assert_eq!(contents, [milk.id]);
}

#[tokio::test]
async fn duplicate_cart_row_is_a_conflict() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;
    let group = create_group(&pool, "Bakery", "bakery").await;
    let product = create_product(&pool, account.id, group.id, "Bread", "B100").await;

    let carts = CartRepository::new(&pool);
    carts.add(account.id, product.id).await.expect("first add");
    let err = carts
        .add(account.id, product.id)
        .await
        .expect_err("duplicate row must fail");
    assert!(err.is_conflict(), "expected Conflict, got {err:?}");

    // Still exactly one row.
    let contents = carts.products_for(account.id).await.expect("list cart");
    assert_eq!(contents, [product.id]);
}

#[tokio::test]
async fn favorites_add_list_remove_and_conflict() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;
    let group = create_group(&pool, "Bakery", "bakery").await;
    let product = create_product(&pool, account.id, group.id, "Bread", "B100").await;

    let favorites = FavoriteRepository::new(&pool);
    favorites
        .add(account.id, product.id)
        .await
        .expect("add favorite");
    let err = favorites
        .add(account.id, product.id)
        .await
        .expect_err("duplicate favorite must fail");
    assert!(err.is_conflict(), "expected Conflict, got {err:?}");

    let contents = favorites
        .products_for(account.id)
        .await
        .expect("list favorites");
    assert_eq!(contents, [product.id]);

    assert!(favorites
        .remove(account.id, product.id)
        .await
        .expect("remove"));
    assert!(favorites
        .products_for(account.id)
        .await
        .expect("list favorites")
        .is_empty());
}

#[tokio::test]
async fn cart_and_favorites_are_independent() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;
    let group = create_group(&pool, "Bakery", "bakery").await;
    let product = create_product(&pool, account.id, group.id, "Bread", "B100").await;

    let carts = CartRepository::new(&pool);
    let favorites = FavoriteRepository::new(&pool);

    // The same pair lives in both tables without colliding.
    carts.add(account.id, product.id).await.expect("add to cart");
    favorites
        .add(account.id, product.id)
        .await
        .expect("add favorite");

    assert!(carts.remove(account.id, product.id).await.expect("remove"));
    assert_eq!(
        favorites
            .products_for(account.id)
            .await
            .expect("list favorites"),
        [product.id]
    );
}

#[tokio::test]
async fn missing_product_add_is_a_conflict() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;

    let err = CartRepository::new(&pool)
        .add(account.id, lavka_core::ProductId::new(999))
        .await
        .expect_err("unknown product must fail");
    assert!(err.is_conflict(), "expected Conflict, got {err:?}");
}

#[tokio::test]
async fn deleting_a_product_clears_it_from_carts_and_favorites() {
    let pool = test_pool().await;
    let account = create_account(&pool, "masha").await;
    let group = create_group(&pool, "Bakery", "bakery").await;
    let product = create_product(&pool, account.id, group.id, "Bread", "B100").await;

    let carts = CartRepository::new(&pool);
    let favorites = FavoriteRepository::new(&pool);
    carts.add(account.id, product.id).await.expect("add to cart");
    favorites
        .add(account.id, product.id)
        .await
        .expect("add favorite");

    assert!(ProductRepository::new(&pool)
        .delete(product.id)
        .await
        .expect("delete product"));

    assert!(carts
        .products_for(account.id)
        .await
        .expect("list cart")
        .is_empty());
    assert!(favorites
        .products_for(account.id)
        .await
        .expect("list favorites")
        .is_empty());
}
