use uuid::Uuid;

use super::{call, call_discarding, failure, ServiceResult};
use crate::resources;
use crate::session::ApiSession;
use crate::transport::HttpTransport;
use crate::types::courts::Court;
use crate::types::games::{Game, GameFormOptions, GameRequest, GameResponse};
use crate::types::locations::Location;
use crate::types::teams::Team;

pub async fn list<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    location_id: Option<Uuid>,
) -> ServiceResult<Vec<Game>> {
    let games: Vec<GameResponse> =
        call(session, "games.list", resources::games::list(location_id)).await?;
    Ok(games.into_iter().map(to_game).collect())
}

pub async fn create<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    input: &GameRequest,
) -> ServiceResult<Game> {
    let game: GameResponse = call(session, "games.create", resources::games::create(input)).await?;
    Ok(to_game(game))
}

pub async fn update<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
    input: &GameRequest,
) -> ServiceResult<Game> {
    let game: GameResponse =
        call(session, "games.update", resources::games::update(id, input)).await?;
    Ok(to_game(game))
}

pub async fn delete<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    id: Uuid,
) -> ServiceResult<()> {
    call_discarding(session, "games.delete", resources::games::delete(id)).await
}

/// Fetch locations, teams and courts concurrently for the game form. The
/// three calls share `cancel_token`, so closing the form aborts all of them.
pub async fn load_form_options<T: HttpTransport + 'static>(
    session: &ApiSession<T>,
    cancel_token: &str,
) -> ServiceResult<GameFormOptions> {
    let (locations, teams, courts) = tokio::try_join!(
        session.request::<Vec<Location>>(resources::locations::list().cancel_token(cancel_token)),
        session.request::<Vec<Team>>(resources::teams::list().cancel_token(cancel_token)),
        session.request::<Vec<Court>>(resources::courts::list(None).cancel_token(cancel_token)),
    )
    .map_err(failure("games.form_options"))?;
    Ok(GameFormOptions {
        locations: locations.data,
        teams: teams.data,
        courts: courts.data,
    })
}

pub fn to_game(dto: GameResponse) -> Game {
    let venue = match &dto.court_name {
        Some(court) => format!("{} · {court}", dto.location_name),
        None => dto.location_name.clone(),
    };
    let score = match (dto.home_score, dto.away_score) {
        (Some(home), Some(away)) => Some(format!("{home} - {away}")),
        _ => None,
    };
    Game {
        id: dto.id,
        title: format!("{} vs {}", dto.home_team_name, dto.away_team_name),
        venue,
        start_time: dto.start_time,
        end_time: dto.end_time,
        score,
        status: dto.status,
    }
}
