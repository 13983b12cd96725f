//! User-facing texts of the register screen.

pub const EMPTY_CART: &str = "Le panier est vide.";
pub const EMPTY_CART_HINT: &str = "Ajoutez des produits pour commencer";
pub const INSUFFICIENT_CASH: &str = "Montant en espèces insuffisant.";
pub const CHECKOUT_IN_FLIGHT: &str = "Finalisation en cours, veuillez patienter.";
pub const ALREADY_FINALIZED: &str = "Vente déjà finalisée. Modifiez le panier pour une nouvelle vente.";
pub const SALE_FINALIZED: &str = "Vente finalisée avec succès !";
pub const CHECKOUT_FAILED: &str = "Erreur lors de la finalisation.";
pub const NETWORK_ERROR: &str = "Erreur réseau. Veuillez réessayer.";
pub const CONFIRM_CLEAR_CART: &str = "Vider entièrement le panier ?";
pub const INVOICE_GENERATED: &str = "Facture générée avec succès !";
pub const INVOICE_FAILED: &str = "Erreur lors de la génération de la facture.";
pub const NO_SALE: &str = "Aucune vente sélectionnée.";

// Button labels
pub const FINALIZE_LABEL: &str = "Finaliser la vente";
pub const FINALIZING_LABEL: &str = "Finalisation...";
pub const FINALIZED_LABEL: &str = "Vente finalisée";
pub const INVOICE_LABEL: &str = "Générer la facture";
pub const PRINT_LABEL: &str = "Imprimer la facture";
