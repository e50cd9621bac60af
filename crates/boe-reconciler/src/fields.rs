//! The canonical field set both documents' extraction schemas agree on

use shared_types::StructuredFields;

/// How a field's values are normalized and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Company,
    Port,
    Amount,
    Date,
    HsCode,
}

/// Fields compared between a commercial invoice and a Bill of Entry.
/// The set is fixed; a value absent on either side is reported as
/// `missing`, never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    InvoiceNumber,
    InvoiceDate,
    ExporterName,
    ConsigneeName,
    TotalValue,
    PortOfLoading,
    PortOfDischarge,
    HsCode,
    CountryOfOrigin,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::InvoiceNumber,
        CanonicalField::InvoiceDate,
        CanonicalField::ExporterName,
        CanonicalField::ConsigneeName,
        CanonicalField::TotalValue,
        CanonicalField::PortOfLoading,
        CanonicalField::PortOfDischarge,
        CanonicalField::HsCode,
        CanonicalField::CountryOfOrigin,
    ];

    /// Stable identifier used in comparison reports
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::InvoiceNumber => "invoice_number",
            CanonicalField::InvoiceDate => "invoice_date",
            CanonicalField::ExporterName => "exporter_name",
            CanonicalField::ConsigneeName => "consignee_name",
            CanonicalField::TotalValue => "total_value",
            CanonicalField::PortOfLoading => "port_of_loading",
            CanonicalField::PortOfDischarge => "port_of_discharge",
            CanonicalField::HsCode => "hs_code",
            CanonicalField::CountryOfOrigin => "country_of_origin",
        }
    }

    /// Human label used in suggestions
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::InvoiceNumber => "the invoice number",
            CanonicalField::InvoiceDate => "the invoice date",
            CanonicalField::ExporterName => "the exporter name",
            CanonicalField::ConsigneeName => "the consignee name",
            CanonicalField::TotalValue => "the total value",
            CanonicalField::PortOfLoading => "the port of loading",
            CanonicalField::PortOfDischarge => "the port of discharge",
            CanonicalField::HsCode => "the HS code",
            CanonicalField::CountryOfOrigin => "the country of origin",
        }
    }

    /// A missing required field fails the whole comparison; the two port
    /// fields are informational
    pub fn required(&self) -> bool {
        !matches!(
            self,
            CanonicalField::PortOfLoading | CanonicalField::PortOfDischarge
        )
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            CanonicalField::InvoiceNumber | CanonicalField::CountryOfOrigin => FieldKind::Text,
            CanonicalField::InvoiceDate => FieldKind::Date,
            CanonicalField::ExporterName | CanonicalField::ConsigneeName => FieldKind::Company,
            CanonicalField::TotalValue => FieldKind::Amount,
            CanonicalField::PortOfLoading | CanonicalField::PortOfDischarge => FieldKind::Port,
            CanonicalField::HsCode => FieldKind::HsCode,
        }
    }

    /// Read this field from a structured extraction; blank counts as absent
    pub fn get<'a>(&self, fields: &'a StructuredFields) -> Option<&'a str> {
        let value = match self {
            CanonicalField::InvoiceNumber => &fields.invoice_number,
            CanonicalField::InvoiceDate => &fields.invoice_date,
            CanonicalField::ExporterName => &fields.exporter_name,
            CanonicalField::ConsigneeName => &fields.consignee_name,
            CanonicalField::TotalValue => &fields.total_value,
            CanonicalField::PortOfLoading => &fields.port_of_loading,
            CanonicalField::PortOfDischarge => &fields.port_of_discharge,
            CanonicalField::HsCode => &fields.hs_code,
            CanonicalField::CountryOfOrigin => &fields.country_of_origin,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_count_as_absent() {
        let fields = StructuredFields {
            invoice_number: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(CanonicalField::InvoiceNumber.get(&fields), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let fields = StructuredFields {
            hs_code: Some(" 8471.30.10 ".to_string()),
            ..Default::default()
        };
        assert_eq!(CanonicalField::HsCode.get(&fields), Some("8471.30.10"));
    }

    #[test]
    fn test_only_port_fields_are_optional() {
        for field in CanonicalField::ALL {
            let optional = matches!(
                field,
                CanonicalField::PortOfLoading | CanonicalField::PortOfDischarge
            );
            assert_eq!(field.required(), !optional);
        }
    }
}
