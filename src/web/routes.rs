use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, Redirect, Response},
};

use crate::core::cart::{add_to_cart as append_to_cart, aggregate};
use crate::core::{CatalogLookup, ProductId};
use crate::utils::error::ShopError;
use crate::web::{session::Session, state::AppState, views};

type HandlerResult = Result<Response, ShopError>;

pub const ADDED_TO_CART: &str = "You added a melon to your cart! Woo!";
pub const CHECKOUT_PENDING: &str = "Sorry! Checkout will be implemented in a future version.";
pub const LOGIN_PENDING: &str = "Oops! This needs to be implemented";

pub async fn index(State(app): State<Arc<AppState>>, headers: HeaderMap) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;
    let flashes = session.state.take_flashes();

    session.commit(&app, Html(views::homepage(&flashes))).await
}

pub async fn list_melons(State(app): State<Arc<AppState>>, headers: HeaderMap) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;
    let flashes = session.state.take_flashes();
    let page = views::melon_list(app.catalog.all(), &flashes);

    session.commit(&app, Html(page)).await
}

pub async fn show_melon(
    State(app): State<Arc<AppState>>,
    Path(id): Path<ProductId>,
    headers: HeaderMap,
) -> HandlerResult {
    let melon = app.catalog.get_by_id(id)?;

    let mut session = Session::load(&app, &headers).await?;
    let flashes = session.state.take_flashes();
    let page = views::melon_detail(melon, &flashes);

    session.commit(&app, Html(page)).await
}

pub async fn add_to_cart(
    State(app): State<Arc<AppState>>,
    Path(id): Path<ProductId>,
    headers: HeaderMap,
) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;

    append_to_cart(&mut session.state, id);
    session.state.flash(ADDED_TO_CART);
    tracing::info!(
        session = %session.id(),
        melon_id = id,
        "Added melon to cart ({} entries)",
        session.state.cart.len()
    );

    session.commit(&app, Redirect::to("/cart")).await
}

pub async fn shopping_cart(State(app): State<Arc<AppState>>, headers: HeaderMap) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;

    let summary = aggregate(&session.state.cart, &app.catalog)?;
    let flashes = session.state.take_flashes();
    let page = views::cart(&summary, &flashes);

    session.commit(&app, Html(page)).await
}

pub async fn show_login(State(app): State<Arc<AppState>>, headers: HeaderMap) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;
    let flashes = session.state.take_flashes();

    session.commit(&app, Html(views::login_form(&flashes))).await
}

pub async fn process_login() -> &'static str {
    LOGIN_PENDING
}

pub async fn checkout(State(app): State<Arc<AppState>>, headers: HeaderMap) -> HandlerResult {
    let mut session = Session::load(&app, &headers).await?;
    session.state.flash(CHECKOUT_PENDING);

    session.commit(&app, Redirect::to("/melons")).await
}
