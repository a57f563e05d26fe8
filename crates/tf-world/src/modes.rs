//! Gameplay modes contributed by the demo adventure.

use tf_core::{HandlerError, Mode, Outcome, SessionCommand};

use crate::adventure::Adventure;
use crate::world::World;

/// Signature of the mode a new or loaded adventure starts in.
pub const START_SIGNATURE: &str = "adventure";

/// Access to the running adventure from a session context.
pub trait AdventureContext {
    /// The loaded adventure, if any.
    fn adventure_mut(&mut self) -> Option<&mut Adventure>;
}

fn loaded<C: AdventureContext>(ctx: &mut C) -> Result<&mut Adventure, HandlerError> {
    ctx.adventure_mut()
        .ok_or_else(|| HandlerError::MissingState("no adventure is loaded".to_string()))
}

/// Build every gameplay mode, keyed by signature.
pub fn modes<C: AdventureContext + 'static>() -> Vec<(String, Mode<C>)> {
    vec![(START_SIGNATURE.to_string(), start_mode())]
}

fn start_mode<C: AdventureContext + 'static>() -> Mode<C> {
    let mut mode = Mode::new(
        World::default().location,
        "Welcome to the WORLD!! Look at all this awesome game that's definitely everywhere!",
    );

    mode.add_command("save", Some("Save the data you manipulated."), |_, _, _| {
        Ok(Outcome::Session(SessionCommand::Save))
    });
    mode.add_command("options", Some("Pause and mess with settings."), |_, _, _| {
        Ok(Outcome::Session(SessionCommand::Settings))
    });
    mode.add_command(
        "use",
        Some("Do fun game things with the stuff that's here. This is a game. I swear."),
        |ctx: &mut C, objects, targets| {
            let adventure = loaded(ctx)?;
            Ok(Outcome::text(
                adventure.world.use_things(adventure.player(), objects, targets),
            ))
        },
    );
    mode.add_command(
        "open",
        Some("Opens a container, if it is... a container..."),
        |ctx: &mut C, objects, targets| {
            Ok(Outcome::text(loaded(ctx)?.world.open(objects, targets)))
        },
    );
    mode.add_command(
        "attack",
        Some("Hit a thing by flailing your fists!"),
        |ctx: &mut C, objects, targets| {
            Ok(Outcome::text(loaded(ctx)?.world.attack(objects, targets)))
        },
    );
    mode.add_command(
        "push",
        Some("Does something... or DOES IT?!!!"),
        |ctx: &mut C, objects, targets| {
            Ok(Outcome::text(loaded(ctx)?.world.push(objects, targets)))
        },
    );
    mode.add_alias("hit", "attack");
    mode.add_alias("shove", "push");

    mode.add_object("cow", "It's a... cow!", Some("Rolls over if you push it enough."));
    mode.add_object("box", "An unassuming box.", Some("Contains a mystery! OR DOES IT?!!"));
    mode.add_object("troll", "Enemy spotted!", Some("Attack it, dummy!"));
    mode
}
