pub mod admin;
pub mod containers;
pub mod health;
pub mod private_pages;
pub mod shared;
pub mod topics;
pub mod videos;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /topics                                           list, create (admin)
/// /topics/{id}                                      get, update, delete (admin)
/// /topics/{id}/sections                             plain sections
/// /topics/{id}/detailed-topics                      detailed topics
///
/// /detailed-topics/{id}                             get, update, delete (admin)
/// /detailed-topics/{id}/sections                    detailed-topic sections
///
/// /containers/{kind}/{id}                           rename, delete (admin)
/// /containers/{kind}/{id}/videos                    ordered members
///
/// /videos                                           create (admin)
/// /videos/{id}                                      get
/// /videos/{id}/placement                            place, unplace (admin)
/// /videos/{id}/location                             back-page lookup
/// /videos/{id}/adjacency                            previous / next (page scope: owner)
/// /videos/{id}/progress                             record view
///
/// /me/history                                       last watched (auth)
///
/// /private-pages                                    create (doctor)
/// /private-pages/{id}                               get, delete (owner)
/// /private-pages/{id}/videos                        list, replace (owner)
/// /private-pages/{id}/documents                     list (owner)
/// /private-pages/{id}/containers/{kind}/{cid}/videos  scoped members (owner)
/// /doctors/{id}/private-pages                       list by doctor (owner)
///
/// /shared/{token}                                   patient view
/// /shared/{token}/containers/{kind}/{cid}/videos    curated members
/// /shared/{token}/videos/{id}/adjacency             curated previous / next
///
/// /admin/topics/{id}/sections/order                 reorder sections
/// /admin/detailed-topics/{id}/sections/order        reorder sections
/// /admin/containers/{kind}/{id}/videos/order        reorder members
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/topics", topics::router())
        .nest("/detailed-topics", topics::detailed_router())
        .nest("/containers", containers::router())
        .nest("/videos", videos::router())
        .nest("/private-pages", private_pages::router())
        .nest("/shared", shared::router())
        .nest("/admin", admin::router())
        .route("/me/history", get(handlers::progression::history))
        .route(
            "/doctors/{id}/private-pages",
            get(handlers::private_pages::list_by_doctor),
        )
}
