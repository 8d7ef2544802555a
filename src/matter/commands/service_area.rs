//! ServiceArea commands.

use super::{CommandResponse, CommandSpec, Invocation};
use crate::error::Result;
use crate::matter::clusters::ServiceAreaState;
use crate::matter::clusters::service_area::{SelectAreasStatus, SkipAreaStatus};
use serde::{Deserialize, Serialize};

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new(0x00, "selectAreas").responds(0x01),
    CommandSpec::new(0x02, "skipArea").responds(0x03),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAreasRequest {
    pub new_areas: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipAreaRequest {
    pub skipped_area: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceAreaCommand {
    SelectAreas(SelectAreasRequest),
    SkipArea(SkipAreaRequest),
}

impl ServiceAreaCommand {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::SelectAreas(_) => "selectAreas",
            Self::SkipArea(_) => "skipArea",
        }
    }
}

fn select_response(status: SelectAreasStatus, text: Option<String>) -> CommandResponse {
    CommandResponse::SelectAreas {
        status,
        status_text: text,
    }
}

fn skip_response(status: SkipAreaStatus, text: Option<String>) -> CommandResponse {
    CommandResponse::SkipArea {
        status,
        status_text: text,
    }
}

pub(super) async fn handle(
    inv: &Invocation<'_>,
    cmd: ServiceAreaCommand,
) -> Result<CommandResponse> {
    match cmd {
        ServiceAreaCommand::SelectAreas(req) => {
            let unsupported = inv.read(|s: &ServiceAreaState| s.first_unsupported(&req.new_areas))?;
            if let Some(area) = unsupported {
                return Ok(select_response(
                    SelectAreasStatus::UnsupportedArea,
                    Some(format!("Unsupported area: {}", area)),
                ));
            }
            inv.forward().await?;
            let mut selected = Vec::with_capacity(req.new_areas.len());
            for area in req.new_areas {
                if !selected.contains(&area) {
                    selected.push(area);
                }
            }
            inv.mutate(|s: &mut ServiceAreaState| {
                s.current_area = selected.first().copied();
                s.selected_areas = selected;
            })?;
            Ok(select_response(SelectAreasStatus::Success, None))
        }
        ServiceAreaCommand::SkipArea(req) => {
            let status = inv.read(|s: &ServiceAreaState| {
                if s.selected_areas.is_empty() {
                    SkipAreaStatus::InvalidAreaList
                } else if !s.supports_area(req.skipped_area)
                    || !s.selected_areas.contains(&req.skipped_area)
                {
                    SkipAreaStatus::InvalidSkippedArea
                } else {
                    SkipAreaStatus::Success
                }
            })?;
            if status != SkipAreaStatus::Success {
                return Ok(skip_response(
                    status,
                    Some(format!("Cannot skip area {}", req.skipped_area)),
                ));
            }
            inv.forward().await?;
            inv.mutate(|s: &mut ServiceAreaState| {
                s.selected_areas.retain(|a| *a != req.skipped_area);
                if s.current_area == Some(req.skipped_area) {
                    s.current_area = s.selected_areas.first().copied();
                }
            })?;
            Ok(skip_response(SkipAreaStatus::Success, None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matter::clusters::BehaviorType;
    use crate::matter::clusters::service_area::AreaStruct;
    use crate::matter::commands::testing::endpoint_with;
    use crate::matter::commands::{Command, CommandInterceptor};
    use crate::matter::device_types;
    use crate::matter::endpoints::Endpoint;

    fn rooms() -> ServiceAreaState {
        ServiceAreaState::new(vec![
            AreaStruct::named(1, "Living"),
            AreaStruct::named(2, "Kitchen"),
            AreaStruct::named(3, "Bedroom"),
        ])
    }

    fn selection(endpoint: &Endpoint) -> (Vec<u32>, Option<u32>) {
        endpoint
            .read_state::<ServiceAreaState, _>(0x0150, |s| {
                (s.selected_areas.clone(), s.current_area)
            })
            .unwrap()
    }

    async fn select(endpoint: &Endpoint, areas: Vec<u32>) -> CommandResponse {
        CommandInterceptor::invoke(
            endpoint,
            Command::ServiceArea(ServiceAreaCommand::SelectAreas(SelectAreasRequest {
                new_areas: areas,
            })),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_select_areas() {
        let (endpoint, recorder) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![(BehaviorType::SERVICE_AREA, rooms().into())],
        );

        let response = select(&endpoint, vec![2, 9]).await;
        assert!(matches!(
            response,
            CommandResponse::SelectAreas {
                status: SelectAreasStatus::UnsupportedArea,
                ..
            }
        ));
        assert_eq!(selection(&endpoint), (vec![], None));
        assert!(recorder.operations().is_empty());

        let response = select(&endpoint, vec![3, 1, 3]).await;
        assert_eq!(response, select_response(SelectAreasStatus::Success, None));
        assert_eq!(selection(&endpoint), (vec![3, 1], Some(3)));
    }

    #[tokio::test]
    async fn test_skip_area() {
        let (endpoint, _) = endpoint_with(
            device_types::ROBOTIC_VACUUM_CLEANER,
            vec![(BehaviorType::SERVICE_AREA, rooms().into())],
        );
        let skip = |area| {
            Command::ServiceArea(ServiceAreaCommand::SkipArea(SkipAreaRequest {
                skipped_area: area,
            }))
        };

        let response = CommandInterceptor::invoke(&endpoint, skip(1)).await.unwrap();
        assert!(matches!(
            response,
            CommandResponse::SkipArea {
                status: SkipAreaStatus::InvalidAreaList,
                ..
            }
        ));

        select(&endpoint, vec![1, 2]).await;
        let response = CommandInterceptor::invoke(&endpoint, skip(3)).await.unwrap();
        assert!(matches!(
            response,
            CommandResponse::SkipArea {
                status: SkipAreaStatus::InvalidSkippedArea,
                ..
            }
        ));

        let response = CommandInterceptor::invoke(&endpoint, skip(1)).await.unwrap();
        assert_eq!(response, skip_response(SkipAreaStatus::Success, None));
        assert_eq!(selection(&endpoint), (vec![2], Some(2)));
    }
}
