use std::io::{self, Write};

use crate::error::{GenError, Result};
use crate::locations::LocationId;
use crate::random::{pick_element, sample_distinct, RandomSource};

pub const SCENARIO_NAMESPACE: &str = "urn:roborescue:map:scenario";

/// Placement of the fire station, the initial fires and the fire brigades.
/// Fires and brigades are drawn independently and may share locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioAssignment {
    pub station: LocationId,
    pub fires: Vec<LocationId>,
    pub agents: Vec<LocationId>,
}

impl ScenarioAssignment {
    /// Fails before drawing anything if the pool can't satisfy both counts.
    pub fn sample<R: RandomSource>(
        pool: &[LocationId],
        fires: usize,
        agents: usize,
        rnd: &mut R,
    ) -> Result<ScenarioAssignment> {
        if pool.is_empty() {
            return Err(GenError::EmptyPool);
        }
        if fires > pool.len() {
            return Err(GenError::sample_exceeded("fires", fires, pool));
        }
        if agents > pool.len() {
            return Err(GenError::sample_exceeded("agents", agents, pool));
        }

        let station = *pick_element(rnd, pool).ok_or(GenError::EmptyPool)?;
        let fires = sample_distinct(rnd, pool, fires)
            .ok_or_else(|| GenError::sample_exceeded("fires", fires, pool))?;
        let agents = sample_distinct(rnd, pool, agents)
            .ok_or_else(|| GenError::sample_exceeded("agents", agents, pool))?;

        Ok(ScenarioAssignment {
            station,
            fires,
            agents,
        })
    }

    pub fn write_xml<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(out)?;
        writeln!(out, r#"<scenario:scenario xmlns:scenario="{}">"#, SCENARIO_NAMESPACE)?;
        writeln!(out)?;

        writeln!(out, "\t<!-- The fire station (do *not* remove this) -->")?;
        writeln!(
            out,
            "\t<scenario:firestation scenario:location=\"{}\"/>",
            self.station
        )?;
        writeln!(out)?;

        writeln!(out, "\t<!-- The initial fires -->")?;
        for fire in self.fires.iter() {
            writeln!(out, "\t<scenario:fire scenario:location=\"{}\"/>", fire)?;
        }
        writeln!(out)?;

        writeln!(out, "\t<!-- The fire fighters -->")?;
        for agent in self.agents.iter() {
            writeln!(out, "\t<scenario:firebrigade scenario:location=\"{}\"/>", agent)?;
        }
        writeln!(out)?;

        writeln!(out, "</scenario:scenario>")
    }

    pub fn to_xml(&self) -> String {
        let mut buffer = Vec::new();
        // writing into a Vec can't fail
        let _ = self.write_xml(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::LocationSet;
    use crate::random::tests::Scripted;
    use crate::random::{Random, Seed};
    use std::collections::HashSet;

    fn paris() -> Vec<LocationId> {
        LocationSet::get_all_tables()["paris"].locations.clone()
    }

    fn count(xml: &str, tag: &str) -> usize {
        xml.matches(&format!("<scenario:{} ", tag)).count()
    }

    #[test]
    fn exact_document() {
        let assignment = ScenarioAssignment {
            station: 52232,
            fires: vec![44376, 48293],
            agents: vec![48293],
        };

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
\n\
<scenario:scenario xmlns:scenario=\"urn:roborescue:map:scenario\">\n\
\n\
\t<!-- The fire station (do *not* remove this) -->\n\
\t<scenario:firestation scenario:location=\"52232\"/>\n\
\n\
\t<!-- The initial fires -->\n\
\t<scenario:fire scenario:location=\"44376\"/>\n\
\t<scenario:fire scenario:location=\"48293\"/>\n\
\n\
\t<!-- The fire fighters -->\n\
\t<scenario:firebrigade scenario:location=\"48293\"/>\n\
\n\
</scenario:scenario>\n";
        assert_eq!(assignment.to_xml(), expected);
    }

    #[test]
    fn scripted_source_gives_exact_sets() {
        let pool = paris();
        let mut rnd = Scripted::new(vec![0]);
        let assignment = ScenarioAssignment::sample(&pool, 3, 2, &mut rnd).unwrap();

        assert_eq!(assignment.station, 52232);
        assert_eq!(assignment.fires, vec![52232, 44376, 48293]);
        assert_eq!(assignment.agents, vec![52232, 44376]);
    }

    #[test]
    fn paris_example() {
        let pool = paris();
        let mut rnd = Random::new(Seed::from_str("paris"));
        let assignment = ScenarioAssignment::sample(&pool, 3, 2, &mut rnd).unwrap();
        let xml = assignment.to_xml();

        assert_eq!(count(&xml, "firestation"), 1);
        assert_eq!(count(&xml, "fire"), 3);
        assert_eq!(count(&xml, "firebrigade"), 2);

        let pool: HashSet<_> = pool.into_iter().collect();
        assert!(pool.contains(&assignment.station));
        assert!(assignment.fires.iter().all(|id| pool.contains(id)));
        assert!(assignment.agents.iter().all(|id| pool.contains(id)));
    }

    #[test]
    fn samples_are_distinct_for_all_counts() {
        let pool = paris();
        let mut rnd = Random::new(Seed::from_u64(1337));

        for fires in [0, 1, 5, 36, 37] {
            for agents in [0, 2, 37] {
                let assignment = ScenarioAssignment::sample(&pool, fires, agents, &mut rnd).unwrap();

                let fire_set: HashSet<_> = assignment.fires.iter().collect();
                let agent_set: HashSet<_> = assignment.agents.iter().collect();
                assert_eq!(fire_set.len(), fires);
                assert_eq!(agent_set.len(), agents);
            }
        }
    }

    #[test]
    fn same_seed_same_document() {
        let pool = paris();
        let a = ScenarioAssignment::sample(&pool, 4, 4, &mut Random::new(Seed::from_u64(9))).unwrap();
        let b = ScenarioAssignment::sample(&pool, 4, 4, &mut Random::new(Seed::from_u64(9))).unwrap();
        assert_eq!(a.to_xml(), b.to_xml());
    }

    #[test]
    fn zero_counts_keep_comments() {
        let pool = paris();
        let mut rnd = Scripted::new(vec![5]);
        let xml = ScenarioAssignment::sample(&pool, 0, 0, &mut rnd).unwrap().to_xml();

        assert!(xml.contains("\t<!-- The initial fires -->\n\n\t<!-- The fire fighters -->\n\n</scenario:scenario>\n"));
        assert_eq!(count(&xml, "firestation"), 1);
        assert_eq!(count(&xml, "fire"), 0);
        assert_eq!(count(&xml, "firebrigade"), 0);
    }

    #[test]
    fn oversized_samples_fail() {
        let pool = paris();
        let mut rnd = Scripted::new(vec![0]);

        assert!(matches!(
            ScenarioAssignment::sample(&pool, 38, 0, &mut rnd),
            Err(GenError::SampleSizeExceeded { group: "fires", requested: 38, available: 37 })
        ));
        assert!(matches!(
            ScenarioAssignment::sample(&pool, 1, 40, &mut rnd),
            Err(GenError::SampleSizeExceeded { group: "agents", .. })
        ));
        // nothing was drawn
        assert_eq!(rnd.cursor, 0);
    }

    #[test]
    fn empty_pool_fails() {
        let mut rnd = Scripted::new(vec![0]);
        assert!(matches!(
            ScenarioAssignment::sample(&[], 0, 0, &mut rnd),
            Err(GenError::EmptyPool)
        ));
    }
}
