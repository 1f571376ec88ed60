//! Class/job ids and the revive/cleanse capability table.

use serde::{Deserialize, Serialize};

/// Red Mage learns Verraise at this level
const RDM_REVIVE_LEVEL: u8 = 64;
/// Bard learns The Warden's Paean at this level
const BRD_CLEANSE_LEVEL: u8 = 35;

/// Class and job ids as reported by the game (`ClassJob` row ids)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Job {
    #[default]
    Adv = 0,
    Gla = 1,
    Pgl = 2,
    Mrd = 3,
    Lnc = 4,
    Arc = 5,
    Cnj = 6,
    Thm = 7,
    Crp = 8,
    Bsm = 9,
    Arm = 10,
    Gsm = 11,
    Ltw = 12,
    Wvr = 13,
    Alc = 14,
    Cul = 15,
    Min = 16,
    Btn = 17,
    Fsh = 18,
    Pld = 19,
    Mnk = 20,
    War = 21,
    Drg = 22,
    Brd = 23,
    Whm = 24,
    Blm = 25,
    Acn = 26,
    Smn = 27,
    Sch = 28,
    Rog = 29,
    Nin = 30,
    Mch = 31,
    Drk = 32,
    Ast = 33,
    Sam = 34,
    Rdm = 35,
    Blu = 36,
    Gnb = 37,
    Dnc = 38,
    Rpr = 39,
    Sge = 40,
    Vpr = 41,
    Pct = 42,
}

impl Job {
    const ALL: [Job; 43] = [
        Job::Adv,
        Job::Gla,
        Job::Pgl,
        Job::Mrd,
        Job::Lnc,
        Job::Arc,
        Job::Cnj,
        Job::Thm,
        Job::Crp,
        Job::Bsm,
        Job::Arm,
        Job::Gsm,
        Job::Ltw,
        Job::Wvr,
        Job::Alc,
        Job::Cul,
        Job::Min,
        Job::Btn,
        Job::Fsh,
        Job::Pld,
        Job::Mnk,
        Job::War,
        Job::Drg,
        Job::Brd,
        Job::Whm,
        Job::Blm,
        Job::Acn,
        Job::Smn,
        Job::Sch,
        Job::Rog,
        Job::Nin,
        Job::Mch,
        Job::Drk,
        Job::Ast,
        Job::Sam,
        Job::Rdm,
        Job::Blu,
        Job::Gnb,
        Job::Dnc,
        Job::Rpr,
        Job::Sge,
        Job::Vpr,
        Job::Pct,
    ];

    /// Look up a job by its raw id. Unknown ids map to `None`.
    pub fn from_id(id: u8) -> Option<Job> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Whether the job has a resurrection spell at all (ignoring level)
    pub fn can_revive(self) -> bool {
        matches!(
            self,
            Job::Cnj
                | Job::Whm
                | Job::Acn
                | Job::Smn
                | Job::Sch
                | Job::Ast
                | Job::Blu
                | Job::Rdm
                | Job::Sge
        )
    }

    /// Whether the job has a status-removal action at all (ignoring level)
    pub fn can_cleanse(self) -> bool {
        matches!(
            self,
            Job::Cnj | Job::Whm | Job::Sch | Job::Ast | Job::Sge | Job::Blu | Job::Brd
        )
    }
}

/// Revive/cleanse capability of the local player at their current level.
///
/// Used to hide highlights the player could not act on anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    job: Job,
    level: u8,
}

impl Eligibility {
    pub fn new(job: Job, level: u8) -> Self {
        Self { job, level }
    }

    pub fn job(&self) -> Job {
        self.job
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn can_revive(&self) -> bool {
        match self.job {
            Job::Rdm => self.level >= RDM_REVIVE_LEVEL,
            job => job.can_revive(),
        }
    }

    pub fn can_cleanse(&self) -> bool {
        match self.job {
            Job::Brd => self.level >= BRD_CLEANSE_LEVEL,
            job => job.can_cleanse(),
        }
    }
}
