use serde::Serialize;
use ts_rs::TS;

use super::entities::MemberDetail;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct MemberResponse {
    pub member: MemberDetail,
}
