use log::debug;

use crate::db::SaveDb;
use crate::error::Result;
use crate::prompt::Choice;

/// Key of the record of the world's local (offline) player.
pub const LOCAL_PLAYER_KEY: &str = "~local_player";

/// Marker in the keys of records of players who joined over the network.
pub const SERVER_PLAYER_MARKER: &str = "player_server_";

/// Menu choices for every player with a record in the database. The local
/// player always comes first, whether or not it has a record.
pub fn player_choices(db: &mut SaveDb) -> Result<Vec<Choice>> {
    let mut choices = vec![Choice::new(
        format!("{} (you)", LOCAL_PLAYER_KEY),
        LOCAL_PLAYER_KEY,
    )];

    // Keys are arbitrary bytes: chunk keys are binary, so only keys that turn
    // out to be text are offered.
    let marker = SERVER_PLAYER_MARKER.as_bytes();
    for key in db.keys()? {
        if !key.windows(marker.len()).any(|w| w == marker) {
            continue;
        }
        match String::from_utf8(key) {
            Ok(key) => choices.push(Choice::new(key.clone(), key)),
            Err(e) => debug!("skipping non-unicode player key {:?}", e.as_bytes()),
        }
    }

    debug!("found {} players", choices.len());
    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::bedrock_options;
    use rusty_leveldb::DB;

    fn world_db(keys: &[&[u8]]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut db = DB::open(dir.path(), bedrock_options()).unwrap();
        for key in keys {
            db.put(key, b"").unwrap();
        }
        db.close().unwrap();
        dir
    }

    #[test]
    fn only_local_player_without_server_keys() {
        let dir = world_db(&[b"~local_player", b"AutonomousEntities", b"\x01\x00\x00\x00,"]);
        let mut db = SaveDb::open(dir.path()).unwrap();

        let choices = player_choices(&mut db).unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].name, LOCAL_PLAYER_KEY);
    }

    #[test]
    fn server_players_follow_local_player() {
        let dir = world_db(&[
            b"player_server_1b2c",
            b"player_server_0a1b",
            b"player_4f9e",
            b"portals",
        ]);
        let mut db = SaveDb::open(dir.path()).unwrap();

        let names: Vec<_> = player_choices(&mut db)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        // LevelDB iterates in key order.
        assert_eq!(
            names,
            ["~local_player", "player_server_0a1b", "player_server_1b2c"]
        );
    }

    #[test]
    fn server_player_message_is_key() {
        let dir = world_db(&[b"player_server_abc"]);
        let mut db = SaveDb::open(dir.path()).unwrap();

        let choices = player_choices(&mut db).unwrap();
        assert_eq!(
            choices[1],
            Choice::new("player_server_abc", "player_server_abc")
        );
    }

    #[test]
    fn binary_keys_with_marker_are_skipped() {
        let dir = world_db(&[b"\xffplayer_server_\xfe"]);
        let mut db = SaveDb::open(dir.path()).unwrap();

        assert_eq!(player_choices(&mut db).unwrap().len(), 1);
    }
}
