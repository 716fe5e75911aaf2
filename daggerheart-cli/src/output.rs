use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use daggerheart_game::{ReferenceData, list_archetypes, list_classes, list_subclasses};

use crate::ListKind;

/// Where a generated sheet or listing goes.
pub enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        };
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

/// One line per entry of the requested reference table.
pub fn write_listing(out: &mut dyn Write, reference: &ReferenceData, kind: ListKind) -> Result<()> {
    match kind {
        ListKind::Classes => {
            for class in list_classes() {
                let info = class.info();
                let [first, second] = class.domains();
                writeln!(
                    out,
                    "{class:10} HP {} Evasion {:2} Domains {first}/{second}",
                    info.hp, info.evasion
                )?;
            }
        }
        ListKind::Subclasses => {
            for class in list_classes() {
                let [first, second] = list_subclasses(*class);
                writeln!(out, "{class:10} {first}, {second}")?;
            }
        }
        ListKind::Ancestries => {
            for ancestry in reference.ancestries() {
                writeln!(out, "{:10} {}", ancestry.name, ancestry.features.join("; "))?;
            }
        }
        ListKind::Communities => {
            for community in reference.communities() {
                writeln!(out, "{:12} {}", community.name, community.feature)?;
            }
        }
        ListKind::Weapons => {
            for (slot, weapons) in [
                ("primary", reference.primary_weapons()),
                ("secondary", reference.secondary_weapons()),
            ] {
                for weapon in weapons {
                    writeln!(
                        out,
                        "{slot:9} {:18} {} d{}{:+}",
                        weapon.name, weapon.attack_trait, weapon.damage_die, weapon.damage_bonus
                    )?;
                }
            }
        }
        ListKind::Armor => {
            for armor in reference.armors() {
                let (minor, major) = armor.base_thresholds;
                writeln!(
                    out,
                    "{:18} thresholds {minor}/{major} score {}",
                    armor.name, armor.base_score
                )?;
            }
        }
        ListKind::Archetypes => {
            for archetype in list_archetypes() {
                let classes: Vec<&str> =
                    archetype.primary_classes().iter().map(|c| c.name()).collect();
                writeln!(out, "{archetype:8} {}", classes.join(", "))?;
            }
        }
    }
    Ok(())
}
