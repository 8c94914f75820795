use std::sync::Arc;

use axum::{routing::post, Json, Router};
use captable_core::constants::INITIAL_ROUND_ID;
use captable_core::palette::{badge_color, round_color, shareholder_color, BaseColor, ShareholderRole};
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareholderRef {
    id: String,
    role: ShareholderRole,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaletteRequest {
    #[serde(default)]
    shareholders: Vec<ShareholderRef>,
    /// Round ids in display order, optionally led by the founders round
    #[serde(default)]
    round_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareholderColors {
    id: String,
    color: String,
    badge: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoundColor {
    id: String,
    color: BaseColor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaletteResponse {
    shareholders: Vec<ShareholderColors>,
    rounds: Vec<RoundColor>,
}

async fn assign_palette(ApiJson(body): ApiJson<PaletteRequest>) -> ApiResult<Json<PaletteResponse>> {
    let shareholders = body
        .shareholders
        .into_iter()
        .map(|s| ShareholderColors {
            color: shareholder_color(&s.id, s.role).bg_class(),
            badge: badge_color(&s.id, s.role).bg_class(),
            id: s.id,
        })
        .collect();

    // Positions count funding rounds only; the founders round is not numbered.
    let mut position = 0;
    let rounds = body
        .round_ids
        .into_iter()
        .map(|id| {
            if id != INITIAL_ROUND_ID {
                position += 1;
            }
            RoundColor {
                color: round_color(&id, position),
                id,
            }
        })
        .collect();

    Ok(Json(PaletteResponse {
        shareholders,
        rounds,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/cap-table/palette", post(assign_palette))
}
