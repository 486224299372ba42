// comanda-client/tests/services.rs
// Service normalization tests against in-process servers

use axum::http::{HeaderMap, header};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use comanda_client::http::FilePart;
use comanda_client::{
    AuthService, CategoryService, ClientConfig, HttpClient, ProductService, TransactionService,
    VariantService,
};
use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{CategoryKind, CategoryPayload};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn test_client(base_url: &str) -> HttpClient {
    ClientConfig::new(base_url)
        .with_timeout(2)
        .with_retry_base_delay_ms(10)
        .build_client()
}

#[tokio::test]
async fn category_list_normalizes_wire_records() {
    let app = Router::new().route(
        "/menu-categories/",
        get(|| async {
            Json(json!({
                "status": "success",
                "data": {
                    "results": [
                        {"id": "1", "name": "Mains", "type": "food"},
                        {"id": 2, "name": "Promo Bundle", "type": "combo-deal", "imageUrl": ""}
                    ],
                    "count": 12
                }
            }))
        }),
    );
    let service = CategoryService::new(test_client(&spawn(app).await));

    let list = service.list().await.unwrap();
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.total, 12);
    assert_eq!(list.items[0].id, 1);
    assert_eq!(list.items[0].kind, CategoryKind::Food);
    assert_eq!(list.items[1].kind, CategoryKind::Other);
    assert_eq!(list.items[1].image_url, None);
}

#[tokio::test]
async fn category_create_sends_multipart_when_image_staged() {
    let app = Router::new().route(
        "/menu-categories/",
        post(|headers: HeaderMap| async move {
            let content_type = headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            assert!(content_type.starts_with("multipart/form-data"));
            Json(json!({
                "status": "success",
                "data": {"id": 9, "name": "Drinks", "type": "drink", "imageUrl": "/media/9.png"}
            }))
        }),
    );
    let service = CategoryService::new(test_client(&spawn(app).await));

    let payload = CategoryPayload {
        name: "Drinks".to_string(),
        description: None,
        kind: CategoryKind::Drink,
        is_displayed: true,
        self_order_visible: false,
        image_url: None,
    };
    let file = FilePart {
        field: "image".to_string(),
        file_name: "drinks.png".to_string(),
        mime: "image/png".to_string(),
        bytes: vec![0u8; 64],
    };
    let created = service.create(&payload, Some(file)).await.unwrap();
    assert_eq!(created.id, 9);
    assert_eq!(created.image_url.as_deref(), Some("/media/9.png"));
}

#[tokio::test]
async fn product_list_requests_inactive_items_too() {
    let app = Router::new().route(
        "/menu-items/",
        get(|axum::extract::RawQuery(raw): axum::extract::RawQuery| async move {
            assert!(raw.unwrap_or_default().contains("includeInactive=true"));
            Json(json!({
                "status": "success",
                "data": [
                    {
                        "id": "8",
                        "name": "Sate Ayam",
                        "description": "Chicken satay",
                        "price": "28000",
                        "categoryId": 3,
                        "isActive": false,
                        "variants": [{"id": 1, "name": "Half", "price": 15000}]
                    }
                ]
            }))
        }),
    );
    let service = ProductService::new(test_client(&spawn(app).await));

    let list = service.list().await.unwrap();
    assert_eq!(list.total, 1);
    let product = &list.items[0];
    assert_eq!(product.id, 8);
    assert_eq!(product.price, Decimal::from(28_000));
    assert!(!product.is_active);
    assert_eq!(product.variants[0].product_id, 8);
}

#[tokio::test]
async fn product_delete_accepts_empty_body() {
    let app = Router::new().route("/menu-items/{id}/", delete(|| async { "" }));
    let service = ProductService::new(test_client(&spawn(app).await));

    service.delete(8).await.unwrap();
}

#[tokio::test]
async fn variant_list_is_scoped_by_product() {
    let app = Router::new().route(
        "/menu-item-variants/menu-item/{id}",
        get(
            |axum::extract::Path(id): axum::extract::Path<i64>| async move {
                Json(json!({
                    "status": "success",
                    "data": [
                        {"id": 1, "name": "Small", "price": 12000},
                        {"id": 2, "name": "Large", "price": "18000", "isActive": false}
                    ],
                    "productId": id
                }))
            },
        ),
    );
    let service = VariantService::new(test_client(&spawn(app).await));

    let variants = service.list_for_product(77).await.unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].product_id, 77);
    assert_eq!(variants[1].price, Decimal::from(18_000));
    assert!(!variants[1].is_active);
}

#[tokio::test]
async fn transactions_are_flattened_per_payment() {
    let app = Router::new().route(
        "/payments/grouped/sessions/details",
        get(|| async {
            Json(json!({
                "status": "success",
                "data": [{
                    "id": 41,
                    "openedAt": "2025-06-01T08:00:00Z",
                    "payments": [
                        {"id": 100, "amount": 56000, "paymentMode": "cash",
                         "orderItems": [{"id": 1, "itemName": "Sate", "quantity": 2, "price": 28000}]},
                        {"id": 101, "amount": 15000, "paymentMode": "qris"}
                    ]
                }]
            }))
        }),
    );
    let service = TransactionService::new(test_client(&spawn(app).await));

    let transactions = service.list().await.unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].cashier_session_id, 41);
    assert_eq!(transactions[1].cashier_session_id, 41);
    assert!(transactions[1].order_items.is_empty());
    assert_eq!(transactions[0].payment_mode.label, "Cash");
}

#[tokio::test]
async fn login_returns_token_user_and_tenant() {
    let app = Router::new().route(
        "/users/login",
        post(|Json(body): Json<serde_json::Value>| async move {
            assert_eq!(body["username"], "admin");
            Json(json!({
                "status": "success",
                "data": {
                    "token": "jwt-token",
                    "user": {"id": "u1", "username": "admin", "role": "owner"},
                    "tenant": {"id": "t1", "name": "Warung Comanda"}
                }
            }))
        }),
    );
    let service = AuthService::new(test_client(&spawn(app).await));

    let login = service.login("admin", "secret").await.unwrap();
    assert_eq!(login.token, "jwt-token");
    assert_eq!(login.user.username, "admin");
    assert_eq!(login.tenant.name, "Warung Comanda");
}
