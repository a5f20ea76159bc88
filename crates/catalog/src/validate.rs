use foundation::ids::PinIndex;

use crate::CatalogError;
use crate::wire::{CreateMapRequest, PinInput};

pub const NO_ADDRESS_MESSAGE: &str = "enter at least one address";

/// Cleans up author input before it is sent to the backend.
///
/// Pins without an address are dropped; the rest are trimmed and unnamed
/// ones become "Property A", "Property B", ... by position among the kept
/// pins.
pub fn prepare_request(
    title: &str,
    pins: impl IntoIterator<Item = PinInput>,
) -> Result<CreateMapRequest, CatalogError> {
    let pins: Vec<PinInput> = pins
        .into_iter()
        .filter(|p| !p.address.trim().is_empty())
        .enumerate()
        .map(|(i, p)| {
            let name = match p.name.trim() {
                "" => format!("Property {}", PinIndex(i).label()),
                name => name.to_string(),
            };
            PinInput {
                name,
                address: p.address.trim().to_string(),
                note: p.note.trim().to_string(),
            }
        })
        .collect();

    if pins.is_empty() {
        return Err(CatalogError::Validation(NO_ADDRESS_MESSAGE.to_string()));
    }
    Ok(CreateMapRequest {
        title: title.trim().to_string(),
        pins,
    })
}

#[cfg(test)]
mod tests {
    use super::{NO_ADDRESS_MESSAGE, prepare_request};
    use crate::CatalogError;
    use crate::wire::PinInput;
    use pretty_assertions::assert_eq;

    fn pin(name: &str, address: &str, note: &str) -> PinInput {
        PinInput {
            name: name.into(),
            address: address.into(),
            note: note.into(),
        }
    }

    #[test]
    fn drops_blank_addresses_and_names_by_kept_position() {
        let req = prepare_request(
            " Viewing list ",
            [
                pin("", "  ", ""),
                pin("  ", " 1-1 Marunouchi ", " south facing "),
                pin("Tower", "2-2 Shibuya", ""),
                pin("", "3-3 Ebisu", ""),
            ],
        )
        .expect("valid");

        assert_eq!(req.title, "Viewing list");
        let names: Vec<&str> = req.pins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Property A", "Tower", "Property C"]);
        assert_eq!(req.pins[0].address, "1-1 Marunouchi");
        assert_eq!(req.pins[0].note, "south facing");
    }

    #[test]
    fn rejects_when_no_address_remains() {
        let err = prepare_request("t", [pin("A", "", ""), pin("B", " \t", "")]).unwrap_err();
        assert_eq!(err, CatalogError::Validation(NO_ADDRESS_MESSAGE.to_string()));
    }
}
