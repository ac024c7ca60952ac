//! Ordered, bounded list of beneficial owners

use super::errors::ContractError;
use super::field::{FieldValue, OwnerField};
use super::owner::{BeneficialOwner, OwnerId};
use serde::{Deserialize, Serialize};

/// Number of other owners that can be disclosed before the filer's own
/// ownership decides whether one more slot opens.
pub const OWNER_DISCLOSURE_CAP: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerList {
    owners: Vec<BeneficialOwner>,
}

impl OwnerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeneficialOwner> {
        self.owners.iter()
    }

    pub fn get(&self, index: usize) -> Option<&BeneficialOwner> {
        self.owners.get(index)
    }

    pub fn position(&self, id: OwnerId) -> Option<usize> {
        self.owners.iter().position(|o| o.id == id)
    }

    /// Whether another owner entry may be appended.
    ///
    /// Three entries is the cap when the filer also owns more than 25%;
    /// otherwise a fourth entry is allowed.
    pub fn can_add_more(&self, owns_more_than_25_percent: bool) -> bool {
        let count = self.owners.len();
        count < OWNER_DISCLOSURE_CAP
            || (count == OWNER_DISCLOSURE_CAP && !owns_more_than_25_percent)
    }

    /// Removal keeps at least one entry on screen
    pub fn can_remove(&self) -> bool {
        self.owners.len() > 1
    }

    /// Append an empty record and return its id
    pub fn add(&mut self, owns_more_than_25_percent: bool) -> Result<OwnerId, ContractError> {
        if !self.can_add_more(owns_more_than_25_percent) {
            return Err(ContractError::OwnerLimitReached);
        }
        let owner = BeneficialOwner::new();
        let id = owner.id;
        self.owners.push(owner);
        Ok(id)
    }

    /// Remove the record with `id`, preserving the order of the others
    pub fn remove(&mut self, id: OwnerId) -> Result<BeneficialOwner, ContractError> {
        let index = self.position(id).ok_or(ContractError::OwnerNotFound)?;
        Ok(self.owners.remove(index))
    }

    pub fn update_field(
        &mut self,
        index: usize,
        field: OwnerField,
        value: FieldValue,
    ) -> Result<(), ContractError> {
        let len = self.owners.len();
        let owner = self
            .owners
            .get_mut(index)
            .ok_or(ContractError::OwnerIndexOutOfRange { index, len })?;
        owner.set(field, value);
        Ok(())
    }

    pub fn to_vec(&self) -> Vec<BeneficialOwner> {
        self.owners.clone()
    }
}

impl From<Vec<BeneficialOwner>> for OwnerList {
    fn from(owners: Vec<BeneficialOwner>) -> Self {
        Self { owners }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> OwnerList {
        OwnerList::from((0..n).map(|_| BeneficialOwner::new()).collect::<Vec<_>>())
    }

    mod can_add_more {
        use super::*;

        #[test]
        fn test_below_cap_always_allowed() {
            for n in 0..OWNER_DISCLOSURE_CAP {
                assert!(list_of(n).can_add_more(true));
                assert!(list_of(n).can_add_more(false));
            }
        }

        #[test]
        fn test_at_cap_depends_on_filer_ownership() {
            let list = list_of(3);
            assert!(!list.can_add_more(true));
            assert!(list.can_add_more(false));
        }

        #[test]
        fn test_above_cap_never_allowed() {
            let list = list_of(4);
            assert!(!list.can_add_more(true));
            assert!(!list.can_add_more(false));
        }
    }

    mod add {
        use super::*;

        #[test]
        fn test_add_appends_empty_record() {
            let mut list = OwnerList::new();
            let id = list.add(false).unwrap();
            assert_eq!(list.len(), 1);
            assert_eq!(list.get(0).unwrap().id, id);
            assert!(list.get(0).unwrap().is_blank());
        }

        #[test]
        fn test_add_refused_at_limit() {
            let mut list = list_of(3);
            assert_eq!(list.add(true), Err(ContractError::OwnerLimitReached));
            assert_eq!(list.len(), 3);
        }

        #[test]
        fn test_fourth_owner_when_filer_is_not_an_owner() {
            let mut list = list_of(3);
            assert!(list.add(false).is_ok());
            assert_eq!(list.add(false), Err(ContractError::OwnerLimitReached));
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn test_remove_preserves_order() {
            let mut list = list_of(3);
            list.update_field(0, OwnerField::FirstName, "A".into()).unwrap();
            list.update_field(1, OwnerField::FirstName, "B".into()).unwrap();
            list.update_field(2, OwnerField::FirstName, "C".into()).unwrap();
            let middle = list.get(1).unwrap().id;

            let removed = list.remove(middle).unwrap();
            assert_eq!(removed.first_name, "B");
            let names: Vec<_> = list.iter().map(|o| o.first_name.as_str()).collect();
            assert_eq!(names, vec!["A", "C"]);
        }

        #[test]
        fn test_remove_reenables_add_at_cap() {
            let mut list = list_of(3);
            assert!(!list.can_add_more(true));
            let first = list.get(0).unwrap().id;
            list.remove(first).unwrap();
            assert!(list.can_add_more(true));
        }

        #[test]
        fn test_remove_duplicates_by_identity() {
            let mut list = list_of(2);
            let second = list.get(1).unwrap().id;
            assert!(list.get(0).unwrap().same_values(list.get(1).unwrap()));
            list.remove(second).unwrap();
            assert_eq!(list.len(), 1);
            assert_ne!(list.get(0).unwrap().id, second);
        }

        #[test]
        fn test_remove_unknown_id() {
            let mut list = list_of(1);
            assert_eq!(
                list.remove(OwnerId::new()).unwrap_err(),
                ContractError::OwnerNotFound
            );
        }

        #[test]
        fn test_can_remove_needs_two() {
            assert!(!list_of(1).can_remove());
            assert!(list_of(2).can_remove());
        }
    }

    mod update_field {
        use super::*;

        #[test]
        fn test_update_field_out_of_range() {
            let mut list = list_of(1);
            assert_eq!(
                list.update_field(3, OwnerField::City, "X".into()),
                Err(ContractError::OwnerIndexOutOfRange { index: 3, len: 1 })
            );
        }

        #[test]
        fn test_update_field_touches_only_target() {
            let mut list = list_of(2);
            list.update_field(1, OwnerField::Dob, "1980-01-01".into())
                .unwrap();
            assert!(list.get(0).unwrap().is_blank());
            assert_eq!(list.get(1).unwrap().dob, "1980-01-01");
        }
    }
}
