//! Shop account details and payout withdrawals

use serde_json::{json, Value};

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::{Money, ResourceKind};
use crate::infrastructure::api::ApiRequest;

pub const ACCOUNT: &str = "__shopAccount";
pub const WITHDRAWALS: &str = "__withdrawals";

pub fn account() -> ApiRequest {
    ApiRequest::get("/shop/account")
}

pub fn update_account(body: Value) -> ApiRequest {
    ApiRequest::put("/shop/account", body)
}

pub fn withdrawals(page: u32) -> ApiRequest {
    ApiRequest::get("/shop/withdrawals").with_query("page", page)
}

pub fn request_withdrawal(amount: &Money) -> ApiRequest {
    ApiRequest::post(
        "/shop/withdrawals",
        json!({ "amount": amount.minor, "currency": amount.currency }),
    )
}

pub fn update_account_profile() -> OperationProfile {
    OperationProfile::new("updatedAccount", "Account details saved")
        .invalidate(InvalidationTarget::Resource(ResourceKind::ShopAccount))
}

pub fn withdrawal_profile() -> OperationProfile {
    OperationProfile::new("requestedWithdrawal", "Withdrawal requested")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Withdrawal))
        .refetch_stale()
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::ShopAccount, &[ACCOUNT]);
    // a withdrawal lowers the balance shown on the account
    graph.register(ResourceKind::Withdrawal, &[WITHDRAWALS, ACCOUNT]);
}
