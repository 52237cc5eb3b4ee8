use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use service::{
    errors::ServiceError,
    warehouses::{
        domain::{parse_quantity, INVALID_AMOUNT, INVALID_CREATE_NUMBERS},
        CreateWarehouseInput,
    },
};
use tracing::{debug, warn};

use crate::flash;
use crate::routes::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub name: Option<String>,
    pub capacity: Option<String>,
    pub initial_balance: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AmountForm {
    pub amount: Option<String>,
}

type PageResponse = (CookieJar, Html<String>);
type RedirectResponse = (CookieJar, Redirect);

/// Turn a service failure into a flash message plus redirect.
/// Unknown ids go back to the list, validation problems back to the form.
fn reject(jar: CookieJar, err: ServiceError, back_to: &str) -> RedirectResponse {
    let target = if err.is_not_found() {
        debug!(event = "warehouse_not_found", error = %err);
        "/"
    } else {
        common::metrics::VALIDATION_ERRORS_TOTAL.inc();
        warn!(event = "validation_failed", error = %err, path = back_to);
        back_to
    };
    (flash::error(jar, err.user_message()), Redirect::to(target))
}

fn not_found(jar: CookieJar, err: ServiceError) -> Result<PageResponse, RedirectResponse> {
    Err(reject(jar, err, "/"))
}

/// List all warehouses
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> PageResponse {
    let records = state.warehouses.list().await;
    let (jar, flashes) = flash::take(jar);
    (jar, Html(views::index(&records, &flashes)))
}

pub async fn create_page(jar: CookieJar) -> PageResponse {
    let (jar, flashes) = flash::take(jar);
    (jar, Html(views::create_form(&flashes)))
}

/// Create a warehouse from the submitted form
pub async fn create_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CreateForm>,
) -> RedirectResponse {
    let parsed = parse_quantity(form.capacity.as_deref(), INVALID_CREATE_NUMBERS).and_then(|capacity| {
        parse_quantity(form.initial_balance.as_deref(), INVALID_CREATE_NUMBERS)
            .map(|initial_balance| (capacity, initial_balance))
    });
    let (capacity, initial_balance) = match parsed {
        Ok(v) => v,
        Err(e) => return reject(jar, e, "/create"),
    };
    let input = CreateWarehouseInput {
        name: form.name.unwrap_or_default(),
        capacity,
        initial_balance,
    };
    match state.warehouses.create(input).await {
        Ok(rec) => (
            flash::success(jar, format!("Warehouse \"{}\" created successfully", rec.name)),
            Redirect::to("/"),
        ),
        Err(e) => reject(jar, e, "/create"),
    }
}

pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> Result<PageResponse, RedirectResponse> {
    let rec = match state.warehouses.get(id).await {
        Ok(rec) => rec,
        Err(e) => return not_found(jar, e),
    };
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::edit_form(&rec, &flashes))))
}

/// Rename a warehouse
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<NameForm>,
) -> RedirectResponse {
    let back_to = format!("/edit/{id}");
    match state.warehouses.rename(id, form.name.as_deref().unwrap_or_default()).await {
        Ok(rec) => (
            flash::success(jar, format!("Warehouse \"{}\" updated successfully", rec.name)),
            Redirect::to("/"),
        ),
        Err(e) => reject(jar, e, &back_to),
    }
}

pub async fn add_page(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> Result<PageResponse, RedirectResponse> {
    let rec = match state.warehouses.get(id).await {
        Ok(rec) => rec,
        Err(e) => return not_found(jar, e),
    };
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::add_form(&rec, &flashes))))
}

/// Deposit into a warehouse; anything beyond capacity is dropped
pub async fn add_submit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<AmountForm>,
) -> RedirectResponse {
    let back_to = format!("/add/{id}");
    if let Err(e) = state.warehouses.get(id).await {
        return reject(jar, e, &back_to);
    }
    let amount = match parse_quantity(form.amount.as_deref(), INVALID_AMOUNT) {
        Ok(v) => v,
        Err(e) => return reject(jar, e, &back_to),
    };
    match state.warehouses.deposit(id, amount).await {
        Ok(rec) => (
            flash::success(jar, format!("Added {} items to warehouse \"{}\"", amount, rec.name)),
            Redirect::to("/"),
        ),
        Err(e) => reject(jar, e, &back_to),
    }
}

pub async fn take_page(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> Result<PageResponse, RedirectResponse> {
    let rec = match state.warehouses.get(id).await {
        Ok(rec) => rec,
        Err(e) => return not_found(jar, e),
    };
    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::take_form(&rec, &flashes))))
}

/// Withdraw from a warehouse; reports the amount actually taken
pub async fn take_submit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
    Form(form): Form<AmountForm>,
) -> RedirectResponse {
    let back_to = format!("/take/{id}");
    if let Err(e) = state.warehouses.get(id).await {
        return reject(jar, e, &back_to);
    }
    let amount = match parse_quantity(form.amount.as_deref(), INVALID_AMOUNT) {
        Ok(v) => v,
        Err(e) => return reject(jar, e, &back_to),
    };
    match state.warehouses.withdraw(id, amount).await {
        Ok(w) => (
            flash::success(jar, format!("Took {} items from warehouse \"{}\"", w.taken, w.record.name)),
            Redirect::to("/"),
        ),
        Err(e) => reject(jar, e, &back_to),
    }
}

/// Delete a warehouse
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    jar: CookieJar,
) -> RedirectResponse {
    match state.warehouses.delete(id).await {
        Ok(rec) => (
            flash::success(jar, format!("Warehouse \"{}\" deleted successfully", rec.name)),
            Redirect::to("/"),
        ),
        Err(e) => reject(jar, e, "/"),
    }
}
